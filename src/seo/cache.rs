use std::collections::{HashMap, VecDeque};
use crate::models::SeoConfig;
use super::head::{Head, HeadScript, MetaKey};
use super::injector::SeoInjector;

pub const DEFAULT_CAPACITY: usize = 64;

struct CachedHead {
    injector: SeoInjector,
    head: Head,
    rendered: String,
}

/// Rendered heads per page, each kept in sync by its own injector.
///
/// A head is only re-rendered when the page's SEO config changes. Past
/// `capacity` pages the oldest head is unmounted and reused for the new one.
pub struct HeadCache {
    base: Head,
    capacity: usize,
    entries: HashMap<String, CachedHead>,
    order: VecDeque<String>,
}

impl HeadCache {
    pub fn new(scripts: Vec<HeadScript>, capacity: usize) -> Self {
        let mut base = Head::new();
        for script in scripts {
            base.add_script(script);
        }
        Self {
            base,
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&mut self, config: &SeoConfig, indexable: bool) -> String {
        let key = format!("{}#{}", config.canonical_url, if indexable { "index" } else { "noindex" });

        let mut entry = match self.entries.remove(&key) {
            Some(entry) => entry,
            None => {
                let entry = self.vacate();
                self.order.push_back(key.clone());
                entry
            }
        };

        let robots = MetaKey::name("robots");
        let mut changed = entry.injector.sync(&mut entry.head, config);
        if !indexable && entry.head.meta(&robots).is_none() {
            entry.head.set_meta(robots, "noindex, nofollow");
            changed = true;
        }

        if changed || entry.rendered.is_empty() {
            tracing::trace!("Rendering head for {}", key);
            entry.rendered = entry.head.render();
        }
        let rendered = entry.rendered.clone();
        self.entries.insert(key, entry);
        rendered
    }

    // A fresh head while under capacity, else the oldest one unmounted
    fn vacate(&mut self) -> CachedHead {
        if self.entries.len() >= self.capacity {
            if let Some(mut entry) = self
                .order
                .pop_front()
                .and_then(|oldest| self.entries.remove(&oldest))
            {
                entry.injector.unmount(&mut entry.head);
                entry.head.remove_meta(&MetaKey::name("robots"));
                entry.rendered.clear();
                return entry;
            }
        }

        CachedHead {
            injector: SeoInjector::new(),
            head: self.base.clone(),
            rendered: String::new(),
        }
    }
}

impl Default for HeadCache {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_CAPACITY)
    }
}
