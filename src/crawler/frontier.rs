//! Crawl frontier: the pending-URL queue driving breadth-first traversal
//!
//! The frontier enforces the crawl scope and the optional level bound at
//! enqueue time. Visited marking is the orchestrator's job and happens
//! only after a successful fetch, so a failed URL rediscovered through
//! another link path gets one more attempt.

use crate::url::in_scope;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL queued for fetching with its hop-distance from the seed
#[derive(Debug, Clone)]
pub struct QueuedPage {
    pub url: Url,
    pub level: u32,
}

/// FIFO frontier with visited- and pending-set bookkeeping
#[derive(Debug)]
pub struct CrawlFrontier {
    scope_host: String,
    max_level: Option<u32>,
    queue: VecDeque<QueuedPage>,
    pending: HashSet<Url>,
    visited: HashSet<Url>,
}

impl CrawlFrontier {
    pub fn new(scope_host: String, max_level: Option<u32>) -> Self {
        Self {
            scope_host,
            max_level,
            queue: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Appends `url` iff it is in scope, within the level bound, and
    /// neither visited nor already pending. Returns whether it was added.
    ///
    /// Out-of-scope URLs are dropped silently; that is normal, not an
    /// error.
    pub fn enqueue_if_new(&mut self, url: Url, level: u32) -> bool {
        if !in_scope(&url, &self.scope_host) {
            return false;
        }
        if let Some(max) = self.max_level {
            if level > max {
                return false;
            }
        }
        if self.visited.contains(&url) || self.pending.contains(&url) {
            return false;
        }

        self.pending.insert(url.clone());
        self.queue.push_back(QueuedPage { url, level });
        true
    }

    /// FIFO pop; the entry leaves the pending set but is not yet visited
    pub fn pop_next(&mut self) -> Option<QueuedPage> {
        let page = self.queue.pop_front()?;
        self.pending.remove(&page.url);
        Some(page)
    }

    /// Marks a URL visited; called after a successful fetch only
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.clone());
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
