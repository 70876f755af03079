use serde::Deserialize;

/// Main configuration structure for Sitecomb
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum pages to fetch; absent means the generous default applies
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,

    /// Maximum hop-distance from the seed; absent disables level bounding
    #[serde(rename = "max-level")]
    pub max_level: Option<u32>,

    /// Delay between page fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Hard ceiling on fetched pages, independent of max-pages
    #[serde(rename = "safety-limit")]
    pub safety_limit: u32,

    /// Emit a progress event every this many pages
    #[serde(rename = "progress-interval")]
    pub progress_interval: u32,
}

impl CrawlerConfig {
    /// Page limit applied when `max-pages` is absent from the config
    pub const DEFAULT_MAX_PAGES: u32 = 200;

    /// The page limit actually enforced by the crawl loop
    pub fn effective_max_pages(&self) -> u32 {
        self.max_pages.unwrap_or(Self::DEFAULT_MAX_PAGES)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: None,
            max_level: None,
            request_delay_ms: 500,
            request_timeout_secs: 10,
            safety_limit: 10_000,
            progress_interval: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value sent with every request
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "sitecomb".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/sitecomb".to_string(),
        }
    }
}
