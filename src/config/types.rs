use serde::Deserialize;

/// Main configuration structure for eventscan
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,

    /// Ordered list of site root URLs to scan
    pub sites: Vec<String>,

    /// Trust metadata entries, keyed by root URL
    #[serde(default, rename = "trust")]
    pub trusts: Vec<TrustEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth from each site root
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Base politeness delay before each fetch (milliseconds)
    #[serde(rename = "fetch-delay-ms", default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Per-site visited-page cap applied to non-priority links
    #[serde(rename = "page-budget", default = "default_page_budget")]
    pub page_budget: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            fetch_delay_ms: default_fetch_delay_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            page_budget: default_page_budget(),
        }
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_page_budget() -> usize {
    100
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
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

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Trust metadata for one crawl root
#[derive(Debug, Clone, Deserialize)]
pub struct TrustEntry {
    /// Root URL exactly as it appears in the sites list
    pub url: String,

    /// Short abbreviation used in reports (e.g. "ATL")
    pub abbrev: String,

    /// Human-readable trust name
    pub name: String,
}
