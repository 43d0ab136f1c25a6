mod task_watcher;

pub use task_watcher::TaskWatcher;
