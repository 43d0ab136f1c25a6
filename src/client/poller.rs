use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::time::sleep;
use crate::errors::{ClientError, ClientResult};
use crate::models::{GenerationTask, TaskState};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_POLL: Duration = Duration::from_secs(600);

#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_task(&self, task_id: &str) -> ClientResult<GenerationTask>;
}

// Every observation of a task, and its terminal state once
pub trait TaskObserver: Send {
    fn observed(&mut self, _task: &GenerationTask) {}

    fn terminal(&mut self, task: &GenerationTask);
}

// Fires on the waiting -> terminal edge only
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    last_seen: HashMap<String, TaskState>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    // True only on the first terminal observation for a task
    pub fn observe(&mut self, task_id: &str, state: TaskState) -> bool {
        let previous = self.last_seen.get(task_id).copied();

        if let Some(previous) = previous {
            if !previous.can_transition_to(state) {
                tracing::warn!(
                    "Ignoring {} -> {} for task {}",
                    previous.as_str(),
                    state.as_str(),
                    task_id
                );
                return false;
            }
        }

        self.last_seen.insert(task_id.to_string(), state);
        state.is_terminal() && !previous.is_some_and(TaskState::is_terminal)
    }

    pub fn last_seen(&self, task_id: &str) -> Option<TaskState> {
        self.last_seen.get(task_id).copied()
    }

    pub fn forget(&mut self, task_id: &str) {
        self.last_seen.remove(task_id);
    }
}

pub struct TaskPoller<S> {
    source: S,
    interval: Duration,
    max_duration: Duration,
    notifier: Arc<Mutex<TerminalNotifier>>,
}

impl<S: TaskSource> TaskPoller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source,
            interval,
            max_duration: DEFAULT_MAX_POLL,
            notifier: Arc::new(Mutex::new(TerminalNotifier::new())),
        }
    }

    // Two pollers sharing a notifier still fire once per task
    pub fn with_notifier(mut self, notifier: Arc<Mutex<TerminalNotifier>>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the task every `interval` until it is terminal, a fetch fails,
    /// or `max_duration` passes.
    pub async fn poll_until_terminal<O: TaskObserver>(
        &self,
        task_id: &str,
        observer: &mut O,
    ) -> ClientResult<GenerationTask> {
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            let task = self.source.fetch_task(task_id).await?;
            polls += 1;
            observer.observed(&task);

            let fire = self
                .notifier
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observe(task_id, task.state);

            if fire {
                tracing::info!(
                    "Task {} reached {} after {} poll(s)",
                    task_id,
                    task.state.as_str(),
                    polls
                );
                observer.terminal(&task);
            }

            if task.is_terminal() {
                return Ok(task);
            }

            let waited = started.elapsed();
            if waited >= self.max_duration {
                tracing::warn!("Giving up on task {} after {} poll(s)", task_id, polls);
                return Err(ClientError::PollTimeout {
                    task_id: task_id.to_string(),
                    waited,
                });
            }

            tracing::trace!("Task {} still waiting, poll {}", task_id, polls);
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{task_in, ScriptedSource};

    #[derive(Default)]
    struct Recorder {
        observed: Vec<TaskState>,
        // number of observations seen when terminal fired
        terminal_at: Vec<usize>,
    }

    impl TaskObserver for Recorder {
        fn observed(&mut self, task: &GenerationTask) {
            self.observed.push(task.state);
        }

        fn terminal(&mut self, _task: &GenerationTask) {
            self.terminal_at.push(self.observed.len());
        }
    }

    fn poller(states: &[TaskState]) -> TaskPoller<ScriptedSource> {
        TaskPoller::new(ScriptedSource::new(states), Duration::from_millis(1))
    }

    #[test]
    fn test_notifier_fires_once_on_edge() {
        let mut notifier = TerminalNotifier::new();
        assert!(!notifier.observe("t", TaskState::Waiting));
        assert!(notifier.observe("t", TaskState::Success));
        assert!(!notifier.observe("t", TaskState::Success));
        assert_eq!(notifier.last_seen("t"), Some(TaskState::Success));
    }

    #[test]
    fn test_notifier_ignores_regression() {
        let mut notifier = TerminalNotifier::new();
        assert!(notifier.observe("t", TaskState::Fail));
        assert!(!notifier.observe("t", TaskState::Waiting));
        assert_eq!(notifier.last_seen("t"), Some(TaskState::Fail));

        notifier.forget("t");
        assert_eq!(notifier.last_seen("t"), None);
    }

    #[tokio::test]
    async fn test_waiting_waiting_success_fires_once_after_third_poll() {
        let poller = poller(&[TaskState::Waiting, TaskState::Waiting, TaskState::Success]);
        let mut recorder = Recorder::default();

        let task = poller.poll_until_terminal("kie-1", &mut recorder).await.unwrap();

        assert_eq!(task.state, TaskState::Success);
        assert_eq!(recorder.terminal_at, vec![3]);
        assert_eq!(poller.source().calls(), 3);
    }

    #[tokio::test]
    async fn test_fail_stops_polling_immediately() {
        // the trailing success must never be fetched
        let poller = poller(&[TaskState::Waiting, TaskState::Fail, TaskState::Success]);
        let mut recorder = Recorder::default();

        let task = poller.poll_until_terminal("kie-1", &mut recorder).await.unwrap();

        assert_eq!(task.state, TaskState::Fail);
        assert_eq!(recorder.observed, vec![TaskState::Waiting, TaskState::Fail]);
        assert_eq!(recorder.terminal_at, vec![2]);
        assert_eq!(poller.source().calls(), 2);
    }

    #[tokio::test]
    async fn test_shared_notifier_fires_once_across_pollers() {
        let notifier = Arc::new(Mutex::new(TerminalNotifier::new()));
        let first = poller(&[TaskState::Success]).with_notifier(notifier.clone());
        let second = poller(&[TaskState::Success]).with_notifier(notifier);
        let mut recorder = Recorder::default();

        first.poll_until_terminal("kie-1", &mut recorder).await.unwrap();
        second.poll_until_terminal("kie-1", &mut recorder).await.unwrap();

        assert_eq!(recorder.observed.len(), 2);
        assert_eq!(recorder.terminal_at, vec![1]);
    }

    #[tokio::test]
    async fn test_fetch_error_ends_polling() {
        let source = ScriptedSource::new(&[TaskState::Waiting]).then_fail(ClientError::Backend {
            status: 404,
            message: "Task not found".into(),
        });
        let poller = TaskPoller::new(source, Duration::from_millis(1));
        let mut recorder = Recorder::default();

        let err = poller.poll_until_terminal("kie-1", &mut recorder).await.unwrap_err();

        assert_eq!(err.to_string(), "Task not found");
        assert!(recorder.terminal_at.is_empty());
    }

    #[tokio::test]
    async fn test_task_stuck_waiting_hits_deadline() {
        let poller = poller(&[TaskState::Waiting; 500]).with_max_duration(Duration::from_millis(20));
        let mut recorder = Recorder::default();

        let err = poller.poll_until_terminal("kie-slow", &mut recorder).await.unwrap_err();

        assert!(matches!(err, ClientError::PollTimeout { ref task_id, .. } if task_id == "kie-slow"));
        assert!(poller.source().calls() < 500);
        assert!(recorder.terminal_at.is_empty());
    }

    #[test]
    fn test_task_in_helper() {
        assert_eq!(task_in("x", TaskState::Fail).fail_code.as_deref(), Some("GENERATION_FAILED"));
    }
}
