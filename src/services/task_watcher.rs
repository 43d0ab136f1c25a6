use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::client::{TaskObserver, TaskPoller, TaskSource, TerminalNotifier};
use crate::config::PollingConfig;
use crate::errors::ClientError;
use crate::models::{GenerationTask, TaskState};
use crate::notifications::{Level, Notification, NotificationFeed};

// Last-seen task per id. Past `capacity` entries the oldest terminal task
// goes first, then the oldest of any state.
struct TaskCache {
    tasks: HashMap<String, (u64, GenerationTask)>,
    capacity: usize,
    next_order: u64,
}

impl TaskCache {
    fn new(capacity: usize) -> Self {
        Self {
            tasks: HashMap::new(),
            capacity: capacity.max(1),
            next_order: 0,
        }
    }

    fn get(&self, task_id: &str) -> Option<&GenerationTask> {
        self.tasks.get(task_id).map(|(_, task)| task)
    }

    fn insert(&mut self, task: GenerationTask) {
        if !self.tasks.contains_key(&task.task_id) && self.tasks.len() >= self.capacity {
            self.evict();
        }
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.insert(task.task_id.clone(), (order, task));
    }

    fn evict(&mut self) {
        let oldest = |terminal_only: bool| {
            self.tasks
                .iter()
                .filter(|(_, (_, task))| !terminal_only || task.is_terminal())
                .min_by_key(|(_, (order, _))| *order)
                .map(|(id, _)| id.clone())
        };
        let victim = oldest(true).or_else(|| oldest(false));
        if let Some(id) = victim {
            tracing::trace!("Evicting task {} from the last-seen cache", id);
            self.tasks.remove(&id);
        }
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}

type SharedCache = Arc<Mutex<TaskCache>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs one background poll per submitted task and keeps the last state
/// each poll saw, for the task page to render.
pub struct TaskWatcher<S> {
    poller: Arc<TaskPoller<S>>,
    notifier: Arc<Mutex<TerminalNotifier>>,
    last_seen: SharedCache,
    watching: Arc<Mutex<HashSet<String>>>,
    feed: NotificationFeed,
}

impl<S> Clone for TaskWatcher<S> {
    fn clone(&self) -> Self {
        Self {
            poller: self.poller.clone(),
            notifier: self.notifier.clone(),
            last_seen: self.last_seen.clone(),
            watching: self.watching.clone(),
            feed: self.feed.clone(),
        }
    }
}

impl<S: TaskSource + 'static> TaskWatcher<S> {
    pub fn new(source: S, config: &PollingConfig, feed: NotificationFeed) -> Self {
        let notifier = Arc::new(Mutex::new(TerminalNotifier::new()));
        let poller = TaskPoller::new(source, config.interval())
            .with_max_duration(config.max_poll())
            .with_notifier(notifier.clone());

        Self {
            poller: Arc::new(poller),
            notifier,
            last_seen: Arc::new(Mutex::new(TaskCache::new(config.cache_capacity))),
            watching: Arc::new(Mutex::new(HashSet::new())),
            feed,
        }
    }

    pub fn source(&self) -> &S {
        self.poller.source()
    }

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn last_seen(&self, task_id: &str) -> Option<GenerationTask> {
        lock(&self.last_seen).get(task_id).cloned()
    }

    pub fn remember(&self, task: GenerationTask) {
        lock(&self.last_seen).insert(task);
    }

    pub fn is_watching(&self, task_id: &str) -> bool {
        lock(&self.watching).contains(task_id)
    }

    /// Starts polling `task_id` in the background. Returns false when a
    /// poll for it is already running or its last state is terminal.
    pub fn watch(&self, task_id: &str) -> bool {
        if self.last_seen(task_id).is_some_and(|task| task.is_terminal()) {
            return false;
        }
        if !lock(&self.watching).insert(task_id.to_string()) {
            return false;
        }

        let watcher = self.clone();
        let task_id = task_id.to_string();
        tokio::spawn(async move {
            watcher.run(&task_id).await;
        });
        true
    }

    async fn run(&self, task_id: &str) {
        tracing::debug!("Watching task {}", task_id);
        let mut observer = WatchObserver {
            last_seen: self.last_seen.clone(),
            feed: self.feed.clone(),
        };

        if let Err(e) = self.poller.poll_until_terminal(task_id, &mut observer).await {
            tracing::error!("Polling task {} failed: {}", task_id, e);
            self.feed.push(
                task_id,
                Notification::new(Level::Error, "Could not check your image", &e.user_message()),
            );
        }

        // The cache answers for finished tasks from here on
        lock(&self.notifier).forget(task_id);
        lock(&self.watching).remove(task_id);
    }
}

struct WatchObserver {
    last_seen: SharedCache,
    feed: NotificationFeed,
}

impl TaskObserver for WatchObserver {
    fn observed(&mut self, task: &GenerationTask) {
        lock(&self.last_seen).insert(task.clone());
    }

    fn terminal(&mut self, task: &GenerationTask) {
        let notification = match task.state {
            TaskState::Success => Notification::new(
                Level::Success,
                "Image ready",
                "Your edited image has been generated.",
            ),
            _ => {
                let failure = ClientError::TaskFailed {
                    task_id: task.task_id.clone(),
                    code: task.fail_code.clone().unwrap_or_default(),
                    message: task
                        .fail_msg
                        .clone()
                        .unwrap_or_else(|| "Generation failed".to_string()),
                };
                Notification::new(Level::Error, "Generation failed", &failure.user_message())
            }
        };
        self.feed.push(&task.task_id, notification);
    }
}
