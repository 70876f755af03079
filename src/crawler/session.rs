//! Per-session crawl state: results and the deduplication ledger
//!
//! All state here is owned by exactly one crawl session and mutated only
//! by its orchestrator; nothing is shared across sessions.

use std::collections::HashSet;
use url::Url;

/// Facts harvested from one page, recorded only when something new was found
///
/// `new_phones`/`new_contacts` hold first admissions; `original_phones`/
/// `original_contacts` keep the full pre-dedup extraction output for audit.
/// Immutable after creation.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub url: Url,
    pub title: String,
    pub new_phones: Vec<String>,
    pub new_contacts: Vec<String>,
    pub original_phones: Vec<String>,
    pub original_contacts: Vec<String>,
}

/// Session-scoped registries of globally-seen phones and contacts
///
/// Seen-sets only grow; there is no removal. An item is returned by an
/// admit call exactly once per session (first-occurrence-wins).
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen_phones: HashSet<String>,
    seen_contacts: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits candidates not seen before in this session, preserving the
    /// caller's order, and marks them seen
    pub fn admit_phones(&mut self, candidates: &[String]) -> Vec<String> {
        admit(&mut self.seen_phones, candidates)
    }

    pub fn admit_contacts(&mut self, candidates: &[String]) -> Vec<String> {
        admit(&mut self.seen_contacts, candidates)
    }

    pub fn phone_count(&self) -> usize {
        self.seen_phones.len()
    }

    pub fn contact_count(&self) -> usize {
        self.seen_contacts.len()
    }
}

fn admit(seen: &mut HashSet<String>, candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| seen.insert((*c).clone()))
        .cloned()
        .collect()
}

/// State owned by a single crawl invocation
///
/// Created once per crawl, discarded after the caller consumes the
/// results. Never shared between sessions.
#[derive(Debug)]
pub struct CrawlSession {
    pub seed: Url,
    pub scope_host: String,
    pub site_title: Option<String>,
    pub page_count: u32,
    pub page_results: Vec<PageResult>,
    pub ledger: DedupLedger,
}

impl CrawlSession {
    pub fn new(seed: Url, scope_host: String) -> Self {
        Self {
            seed,
            scope_host,
            site_title: None,
            page_count: 0,
            page_results: Vec::new(),
            ledger: DedupLedger::new(),
        }
    }

    pub fn total_phones(&self) -> usize {
        self.ledger.phone_count()
    }

    pub fn total_contacts(&self) -> usize {
        self.ledger.contact_count()
    }
}
