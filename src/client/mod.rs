//! Client for the generation backend: task submission, polling, retry.

mod generation;
mod poller;
mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use generation::GenerationClient;
pub use poller::{TaskObserver, TaskPoller, TaskSource, TerminalNotifier, DEFAULT_POLL_INTERVAL};
pub use retry::{retry_fixed, RetryPolicy};
