use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1000);
pub const DEFAULT_CAPACITY: usize = 1024;

// Last report time per (visitor, route). Past `capacity` pairs the stalest goes.
#[derive(Debug)]
pub struct PageViewDeduper {
    window: Duration,
    capacity: usize,
    last_reported: HashMap<(String, String), Instant>,
}

impl PageViewDeduper {
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            last_reported: HashMap::new(),
        }
    }

    // A suppressed call does not extend the window
    pub fn should_report(&mut self, visitor: &str, path: &str, now: Instant) -> bool {
        let key = (visitor.to_string(), path.to_string());
        if let Some(last) = self.last_reported.get(&key) {
            if now.saturating_duration_since(*last) < self.window {
                return false;
            }
        }

        if !self.last_reported.contains_key(&key) && self.last_reported.len() >= self.capacity {
            self.evict_oldest();
        }
        self.last_reported.insert(key, now);
        true
    }

    pub fn has_seen(&self, visitor: &str, path: &str) -> bool {
        self.last_reported
            .contains_key(&(visitor.to_string(), path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.last_reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_reported.is_empty()
    }

    pub fn clear(&mut self) {
        self.last_reported.clear();
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .last_reported
            .iter()
            .min_by_key(|(_, at)| **at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.last_reported.remove(&key);
        }
    }
}

impl Default for PageViewDeduper {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_CAPACITY)
    }
}
