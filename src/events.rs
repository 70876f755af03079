//! Progress events and the sink they are delivered through
//!
//! The orchestrator pushes structured events through a one-way,
//! non-blocking `ProgressSink`; the consumer buffers and drains them
//! asynchronously. A sink must never make `emit` fail the crawl —
//! delivery is best-effort, fire-and-forget.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Structured progress event, serialized with a `type` discriminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Crawl accepted: seed URL and the page limit actually in effect
    Start { url: String, max_pages: u32 },

    /// Site title captured from the seed page (best-effort)
    SiteTitle { title: String },

    /// About to fetch page `index`; `queue` is the frontier depth
    PageStart {
        index: u32,
        url: String,
        queue: usize,
    },

    /// Page processed; counts cover newly admitted facts only
    PageResult {
        index: u32,
        url: String,
        new_phones: usize,
        new_contacts: usize,
    },

    /// Periodic totals, emitted every progress-interval pages
    Progress {
        pages: u32,
        queue: usize,
        phones: usize,
        contacts: usize,
    },

    /// Crawl finished normally (not emitted on cancellation)
    Done {
        pages: u32,
        phones: usize,
        contacts: usize,
    },

    /// Unrecoverable session failure
    Error { message: String },
}

/// One-way event delivery contract
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Discards every event
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Reports events through the tracing subscriber
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::Start { url, max_pages } => {
                tracing::info!("Starting crawl of {} (page limit {})", url, max_pages);
            }
            ProgressEvent::SiteTitle { title } => {
                tracing::info!("Site title: {}", title);
            }
            ProgressEvent::PageStart { index, url, queue } => {
                tracing::info!("Fetching page {} ({} queued): {}", index, queue, url);
            }
            ProgressEvent::PageResult {
                url,
                new_phones,
                new_contacts,
                ..
            } => {
                if *new_phones > 0 || *new_contacts > 0 {
                    tracing::info!(
                        "{}: {} new phones, {} new contacts",
                        url,
                        new_phones,
                        new_contacts
                    );
                }
            }
            ProgressEvent::Progress {
                pages,
                queue,
                phones,
                contacts,
            } => {
                tracing::info!(
                    "Progress: {} pages fetched, {} queued, {} phones, {} contacts",
                    pages,
                    queue,
                    phones,
                    contacts
                );
            }
            ProgressEvent::Done {
                pages,
                phones,
                contacts,
            } => {
                tracing::info!(
                    "Crawl complete: {} pages, {} phones, {} contacts",
                    pages,
                    phones,
                    contacts
                );
            }
            ProgressEvent::Error { message } => {
                tracing::error!("Crawl failed: {}", message);
            }
        }
    }
}

/// Forwards events into an unbounded channel; send errors (consumer
/// gone) are ignored per the fire-and-forget contract
pub struct ChannelSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }
}
