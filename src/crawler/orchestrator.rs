//! Crawl orchestration: the breadth-first loop tying everything together
//!
//! One `Crawler` drives one session at a time: pop a URL from the
//! frontier, fetch it, run the extractors, admit new facts through the
//! session ledger, enqueue discovered links, emit progress, pace, repeat.
//! Per-page failures are recovered locally; only a malformed seed is
//! fatal.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::parser::parse_page;
use crate::crawler::session::{CrawlSession, PageResult};
use crate::crawler::CancelToken;
use crate::events::{ProgressEvent, ProgressSink};
use crate::extract::{sanitize_text, ContactExtractor, PhoneExtractor};
use crate::url::extract_host;
use crate::SitecombError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Fallback page title when a page has none
const UNTITLED: &str = "无标题";

/// Same-site crawl orchestrator
pub struct Crawler {
    config: Config,
    client: Client,
    sink: Arc<dyn ProgressSink>,
    cancel: CancelToken,
    phones: PhoneExtractor,
    contacts: ContactExtractor,
}

impl Crawler {
    pub fn new(
        config: Config,
        sink: Arc<dyn ProgressSink>,
        cancel: CancelToken,
    ) -> Result<Self, SitecombError> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout_secs)?;

        Ok(Self {
            config,
            client,
            sink,
            cancel,
            phones: PhoneExtractor::new(),
            contacts: ContactExtractor::new(),
        })
    }

    /// Runs a full crawl session from `seed`
    ///
    /// Returns the finished session. A cancelled session returns early
    /// with whatever it collected and no `done` event; a malformed seed
    /// aborts before any fetch with an `error` event.
    pub async fn run(&self, seed: &str) -> Result<CrawlSession, SitecombError> {
        // INIT: seed validation is the only fatal failure at this layer
        let (seed_url, scope_host) = match validate_seed(seed) {
            Ok(parts) => parts,
            Err(e) => {
                self.sink.emit(ProgressEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        let max_pages = self.config.crawler.effective_max_pages();
        let safety_limit = self.config.crawler.safety_limit;
        let progress_interval = self.config.crawler.progress_interval;
        let pacing = Duration::from_millis(self.config.crawler.request_delay_ms);

        let mut session = CrawlSession::new(seed_url.clone(), scope_host.clone());
        self.sink.emit(ProgressEvent::Start {
            url: seed_url.to_string(),
            max_pages,
        });

        // FETCHING_SEED: capture the site title, best-effort
        self.capture_site_title(&seed_url, &mut session).await;

        let mut frontier = CrawlFrontier::new(scope_host, self.config.crawler.max_level);
        frontier.enqueue_if_new(seed_url, 0);

        // CRAWLING
        while session.page_count < max_pages && session.page_count < safety_limit {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after {} pages", session.page_count);
                return Ok(session);
            }

            let Some(queued) = frontier.pop_next() else {
                break;
            };
            if frontier.is_visited(&queued.url) {
                continue;
            }
            if let Some(max_level) = self.config.crawler.max_level {
                if queued.level > max_level {
                    continue;
                }
            }

            let index = session.page_count + 1;
            self.sink.emit(ProgressEvent::PageStart {
                index,
                url: queued.url.to_string(),
                queue: frontier.queue_depth(),
            });

            let body = match fetch_page(&self.client, queued.url.as_str()).await {
                FetchOutcome::Success { body, .. } => body,
                FetchOutcome::HttpError { status_code } => {
                    tracing::warn!("Skipping {} (HTTP {})", queued.url, status_code);
                    continue;
                }
                FetchOutcome::NetworkError { error } => {
                    tracing::warn!("Skipping {} ({})", queued.url, error);
                    continue;
                }
            };

            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after {} pages", session.page_count);
                return Ok(session);
            }

            frontier.mark_visited(&queued.url);
            session.page_count += 1;

            let parsed = parse_page(&body, &queued.url);
            let (new_phones, new_contacts) =
                self.harvest_page(&queued.url, &parsed.title, &parsed.text, &mut session);

            self.sink.emit(ProgressEvent::PageResult {
                index,
                url: queued.url.to_string(),
                new_phones,
                new_contacts,
            });

            for link in parsed.links {
                frontier.enqueue_if_new(link, queued.level + 1);
            }

            if session.page_count % progress_interval == 0 {
                self.sink.emit(ProgressEvent::Progress {
                    pages: session.page_count,
                    queue: frontier.queue_depth(),
                    phones: session.total_phones(),
                    contacts: session.total_contacts(),
                });
            }

            tokio::time::sleep(pacing).await;
        }

        // DONE
        self.sink.emit(ProgressEvent::Done {
            pages: session.page_count,
            phones: session.total_phones(),
            contacts: session.total_contacts(),
        });

        Ok(session)
    }

    /// Fetches the seed once to capture the site title; failure is logged
    /// and the crawl proceeds without one
    async fn capture_site_title(&self, seed_url: &Url, session: &mut CrawlSession) {
        match fetch_page(&self.client, seed_url.as_str()).await {
            FetchOutcome::Success { body, .. } => {
                let title = parse_page(&body, seed_url)
                    .title
                    .map(|t| sanitize_text(&t))
                    .filter(|t| !t.is_empty());

                if let Some(title) = title {
                    session.site_title = Some(title.clone());
                    self.sink.emit(ProgressEvent::SiteTitle { title });
                }
            }
            FetchOutcome::HttpError { status_code } => {
                tracing::warn!("Could not capture site title (HTTP {})", status_code);
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!("Could not capture site title ({})", error);
            }
        }
    }

    /// Extracts facts from one page's text and admits the new ones
    ///
    /// Records a PageResult only when something new was admitted. Returns
    /// the admitted counts for the page_result event.
    fn harvest_page(
        &self,
        url: &Url,
        title: &Option<String>,
        text: &str,
        session: &mut CrawlSession,
    ) -> (usize, usize) {
        let phones = self.phones.extract(text);
        let contacts = self.contacts.extract(text);

        let new_phones = session.ledger.admit_phones(&phones);
        let new_contacts = session.ledger.admit_contacts(&contacts);
        let counts = (new_phones.len(), new_contacts.len());

        let duplicate_phones = phones.len() - new_phones.len();
        let duplicate_contacts = contacts.len() - new_contacts.len();
        if duplicate_phones > 0 || duplicate_contacts > 0 {
            tracing::debug!(
                "{}: suppressed {} duplicate phones, {} duplicate contacts",
                url,
                duplicate_phones,
                duplicate_contacts
            );
        }

        if !new_phones.is_empty() || !new_contacts.is_empty() {
            let title = title
                .as_deref()
                .map(sanitize_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNTITLED.to_string());

            session.page_results.push(PageResult {
                url: url.clone(),
                title,
                new_phones,
                new_contacts,
                original_phones: phones,
                original_contacts: contacts,
            });
        }

        counts
    }
}

/// Validates the seed URL: parseable, http(s), and with a host
fn validate_seed(seed: &str) -> Result<(Url, String), SitecombError> {
    let url = Url::parse(seed).map_err(|e| SitecombError::MalformedSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SitecombError::MalformedSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let host = extract_host(&url).ok_or_else(|| SitecombError::MalformedSeed {
        url: seed.to_string(),
        reason: "missing host".to_string(),
    })?;

    Ok((url, host))
}
