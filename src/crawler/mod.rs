//! Crawl engine: frontier, fetcher, page parser, and orchestrator

mod fetcher;
mod frontier;
mod orchestrator;
mod parser;
mod session;

pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::{CrawlFrontier, QueuedPage};
pub use orchestrator::Crawler;
pub use parser::{parse_page, ParsedPage};
pub use session::{CrawlSession, DedupLedger, PageResult};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag for a crawl session
///
/// Cloned handles share the flag. The orchestrator checks it at the top
/// of each loop iteration and after each fetch; cancellation is never
/// preemptive.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
