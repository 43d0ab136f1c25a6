use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const PER_TASK_CAPACITY: usize = 8;
const DEFAULT_MAX_TASKS: usize = 256;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

// A transient toast for one task page
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub title: String,
    pub message: String,
    pub task_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: Level, title: &str, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            title: title.to_string(),
            message: message.to_string(),
            task_id: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct Pending {
    // task id -> (first push order, toasts)
    tasks: HashMap<String, (u64, VecDeque<Notification>)>,
    next_order: u64,
}

/// Pending toasts per task, oldest first.
///
/// Only the page showing a task drains that task's toasts. Each task keeps
/// at most a few toasts, and once `max_tasks` tasks have pending toasts the
/// one that has waited longest is dropped.
#[derive(Clone)]
pub struct NotificationFeed {
    pending: Arc<Mutex<Pending>>,
    max_tasks: usize,
}

impl NotificationFeed {
    pub fn new(max_tasks: usize) -> Self {
        Self {
            pending: Arc::new(Mutex::new(Pending::default())),
            max_tasks: max_tasks.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, task_id: &str, mut notification: Notification) {
        tracing::debug!(
            "Toast for {} [{:?}] {}: {}",
            task_id,
            notification.level,
            notification.title,
            notification.message
        );
        notification.task_id = Some(task_id.to_string());

        let mut pending = self.lock();
        if !pending.tasks.contains_key(task_id) && pending.tasks.len() >= self.max_tasks {
            let stalest = pending
                .tasks
                .iter()
                .min_by_key(|(_, (order, _))| *order)
                .map(|(id, _)| id.clone());
            if let Some(id) = stalest {
                pending.tasks.remove(&id);
            }
        }

        let order = pending.next_order;
        pending.next_order += 1;
        let (_, queue) = pending
            .tasks
            .entry(task_id.to_string())
            .or_insert_with(|| (order, VecDeque::new()));
        if queue.len() >= PER_TASK_CAPACITY {
            queue.pop_front();
        }
        queue.push_back(notification);
    }

    pub fn drain(&self, task_id: &str) -> Vec<Notification> {
        self.lock()
            .tasks
            .remove(task_id)
            .map(|(_, queue)| Vec::from(queue))
            .unwrap_or_default()
    }

    pub fn pending(&self, task_id: &str) -> usize {
        self.lock().tasks.get(task_id).map_or(0, |(_, queue)| queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TASKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_task_drains_only_its_own_toasts() {
        let feed = NotificationFeed::default();
        feed.push("task-a", Notification::new(Level::Success, "Image ready", "a"));
        feed.push("task-b", Notification::new(Level::Error, "Generation failed", "b"));
        feed.push("task-a", Notification::new(Level::Info, "second", "a2"));

        let drained = feed.drain("task-a");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "Image ready");
        assert!(drained.iter().all(|n| n.task_id.as_deref() == Some("task-a")));

        assert_eq!(feed.pending("task-b"), 1);
        assert_eq!(feed.drain("task-b")[0].message, "b");
        assert!(feed.drain("task-a").is_empty());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_per_task_capacity_drops_oldest() {
        let feed = NotificationFeed::default();
        for i in 0..PER_TASK_CAPACITY + 2 {
            feed.push("t", Notification::new(Level::Info, &i.to_string(), ""));
        }

        let titles: Vec<_> = feed.drain("t").into_iter().map(|n| n.title).collect();
        assert_eq!(titles.len(), PER_TASK_CAPACITY);
        assert_eq!(titles[0], "2");
    }

    #[test]
    fn test_task_bound_evicts_stalest_task() {
        let feed = NotificationFeed::new(2);
        feed.push("first", Notification::new(Level::Info, "1", ""));
        feed.push("second", Notification::new(Level::Info, "2", ""));
        feed.push("third", Notification::new(Level::Info, "3", ""));

        assert_eq!(feed.pending("first"), 0);
        assert_eq!(feed.pending("second"), 1);
        assert_eq!(feed.pending("third"), 1);
    }

    #[test]
    fn test_serialises_for_the_task_page() {
        let feed = NotificationFeed::default();
        feed.push("kie-1", Notification::new(Level::Success, "Image ready", "done"));
        let value = serde_json::to_value(&feed.drain("kie-1")[0]).unwrap();

        assert_eq!(value["level"], "success");
        assert_eq!(value["taskId"], "kie-1");
        assert!(value.get("createdAt").is_some());
    }
}
