// src/config.rs
// =============================================================================
// This file holds the settings for one crawl run.
//
// A CrawlConfig is built once from the seed URL and the page budget, and is
// never changed afterwards. Every other part of the crawler borrows it.
//
// What lives here:
// - The seed URL and the "base domain" we are allowed to stay inside
// - The page budget (how many titles we collect at most)
// - The user agent, request timeout and politeness delay
// - The list of file extensions we never fetch
//
// Rust concepts:
// - Builder methods: with_xxx(mut self, ...) -> Self for optional settings
// - Associated constants and const arrays
// - Result<T, E>: Invalid seed URLs are reported as errors, not panics
// =============================================================================

use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

/// Browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default page budget when the user does not pass --max-pages.
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between two consecutive fetches.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Title recorded for pages without a usable <title> element.
pub const NO_TITLE: &str = "No title";

// Path suffixes that point at non-HTML resources
// (images, stylesheets, scripts, archives, office documents, video)
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".bmp", ".webp", ".tiff", ".css", ".js",
    ".xml", ".zip", ".mp4", ".mov", ".avi", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
];

// Immutable per-run settings
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts
    pub seed: Url,
    /// Host of the seed; links must match it exactly
    pub base_host: String,
    /// Explicit port of the seed, if any (part of the "netloc")
    pub base_port: Option<u16>,
    /// Maximum number of titles to collect
    pub max_pages: usize,
    pub user_agent: String,
    pub excluded_extensions: Vec<String>,
    pub timeout: Duration,
    pub delay: Duration,
}

impl CrawlConfig {
    // Builds a config with the reference defaults
    //
    // Parameters:
    //   seed_url: absolute http/https URL to start from
    //   max_pages: page budget (0 is allowed and means "do nothing")
    //
    // Returns: an error if the seed is not an absolute http(s) URL with a host
    pub fn new(seed_url: &str, max_pages: usize) -> Result<Self> {
        let seed = Url::parse(seed_url.trim())
            .map_err(|e| anyhow!("Invalid URL '{}': {}", seed_url, e))?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(anyhow!(
                "Unsupported scheme '{}' in {}: only http and https can be crawled",
                seed.scheme(),
                seed_url
            ));
        }

        let base_host = seed
            .host_str()
            .ok_or_else(|| anyhow!("URL has no host: {}", seed_url))?
            .to_string();
        let base_port = seed.port();

        Ok(Self {
            seed,
            base_host,
            base_port,
            max_pages,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            excluded_extensions: EXCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    // The base domain as "host" or "host:port", used in log lines
    pub fn base_domain(&self) -> String {
        match self.base_port {
            Some(port) => format!("{}:{}", self.base_host, port),
            None => self.base_host.clone(),
        }
    }

    // {scheme}://{host}/robots.txt for the seed
    pub fn robots_url(&self) -> String {
        format!("{}://{}/robots.txt", self.seed.scheme(), self.base_domain())
    }

    // Same-domain check: http(s) scheme and exactly the seed's host and port.
    // Subdomains do not count.
    pub fn is_same_domain(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url.host_str() == Some(self.base_host.as_str())
            && url.port() == self.base_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = CrawlConfig::new("https://example.test/", 20).unwrap();
        assert_eq!(config.base_host, "example.test");
        assert_eq!(config.base_port, None);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.excluded_extensions.len(), 22);
    }

    #[test]
    fn test_rejects_non_http_seed() {
        assert!(CrawlConfig::new("ftp://example.test/", 10).is_err());
        assert!(CrawlConfig::new("not a url", 10).is_err());
    }

    #[test]
    fn test_robots_url_keeps_port() {
        let config = CrawlConfig::new("http://localhost:8080/docs/", 5).unwrap();
        assert_eq!(config.robots_url(), "http://localhost:8080/robots.txt");
    }

    #[test]
    fn test_same_domain_is_exact() {
        let config = CrawlConfig::new("https://example.test", 5).unwrap();
        let same = Url::parse("http://example.test/about").unwrap();
        let sub = Url::parse("https://www.example.test/about").unwrap();
        let other_port = Url::parse("https://example.test:8443/about").unwrap();
        let ftp = Url::parse("ftp://example.test/file").unwrap();

        assert!(config.is_same_domain(&same));
        assert!(!config.is_same_domain(&sub));
        assert!(!config.is_same_domain(&other_port));
        assert!(!config.is_same_domain(&ftp));
    }
}
