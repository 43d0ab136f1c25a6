use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use chrono::Utc;
use crate::errors::{ClientError, ClientResult};
use crate::models::{GenerationTask, OutputConfig, TaskState};
use super::poller::TaskSource;

pub fn task_in(task_id: &str, state: TaskState) -> GenerationTask {
    GenerationTask {
        id: format!("local-{}", task_id),
        task_id: task_id.to_string(),
        model: "google/nano-banana-edit".into(),
        state,
        prompt: "put a hat on the dog".into(),
        image_input: Vec::new(),
        output: OutputConfig::default(),
        result_urls: match state {
            TaskState::Success => vec![format!("https://cdn.example.com/{}.png", task_id)],
            _ => Vec::new(),
        },
        fail_code: (state == TaskState::Fail).then(|| "GENERATION_FAILED".to_string()),
        fail_msg: (state == TaskState::Fail).then(|| "The model could not edit this image".to_string()),
        cost_time_ms: None,
        complete_time: state.is_terminal().then(Utc::now),
        created_at: Utc::now(),
    }
}

// Fixed sequence of states, then an optional error
pub struct ScriptedSource {
    states: Mutex<VecDeque<TaskState>>,
    error: Mutex<Option<ClientError>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(states: &[TaskState]) -> Self {
        Self {
            states: Mutex::new(states.iter().copied().collect()),
            error: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn then_fail(self, error: ClientError) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskSource for ScriptedSource {
    async fn fetch_task(&self, task_id: &str) -> ClientResult<GenerationTask> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.states.lock().unwrap().pop_front();
        match next {
            Some(state) => Ok(task_in(task_id, state)),
            None => Err(self.error.lock().unwrap().take().unwrap_or_else(|| {
                ClientError::Decode("script exhausted".into())
            })),
        }
    }
}
