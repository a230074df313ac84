// src/robots/policy.rs
// =============================================================================
// This module decides whether robots.txt lets us fetch a URL.
//
// How it works:
// 1. At the start of a crawl we GET {scheme}://{host}/robots.txt once
// 2. The rules are parsed with the `texting_robots` crate
// 3. Before every page fetch the engine asks allowed(url)
//
// Failure policy:
// - 200: use the parsed rules
// - 401 / 403: the site forbids access, deny everything
// - anything else (404, 500, timeout, garbage file): allow everything
//   A broken robots.txt must not block the whole crawl.
//
// We never retry loading robots.txt within a run.
// =============================================================================

use crate::fetch::Transport;
use texting_robots::Robot;
use tracing::{info, warn};

pub enum PolicyGate {
    /// No usable robots.txt: everything is allowed
    AllowAll,
    /// robots.txt access was refused: nothing is allowed
    DenyAll,
    /// Parsed rules for our user agent
    Rules(Box<Robot>),
}

impl PolicyGate {
    pub fn allow_all() -> Self {
        PolicyGate::AllowAll
    }

    // Builds a gate from robots.txt text
    //
    // Parameters:
    //   user_agent: our full User-Agent header; rules are matched against its
    //               product token (e.g. "Mozilla" for "Mozilla/5.0 (...)")
    //   robots_txt: the file contents
    //
    // Unparseable input falls back to allow-all.
    pub fn from_robots_txt(user_agent: &str, robots_txt: &str) -> Self {
        match Robot::new(product_token(user_agent), robots_txt.as_bytes()) {
            Ok(robot) => PolicyGate::Rules(Box::new(robot)),
            Err(e) => {
                warn!("Could not parse robots.txt, allowing all URLs: {}", e);
                PolicyGate::AllowAll
            }
        }
    }

    // Fetches and parses robots.txt (one request, no retries)
    pub async fn load<T>(transport: &T, robots_url: &str, user_agent: &str) -> Self
    where
        T: Transport + ?Sized,
    {
        match transport.get(robots_url).await {
            Ok(response) if response.status == 200 => {
                let text = String::from_utf8_lossy(&response.body);
                info!("Loaded robots.txt: {}", robots_url);
                Self::from_robots_txt(user_agent, &text)
            }
            Ok(response) if response.status == 401 || response.status == 403 => {
                warn!(
                    "robots.txt returned HTTP {}, treating every URL as disallowed",
                    response.status
                );
                PolicyGate::DenyAll
            }
            Ok(response) => {
                info!(
                    "No robots.txt at {} (HTTP {}), allowing all URLs",
                    robots_url, response.status
                );
                PolicyGate::AllowAll
            }
            Err(e) => {
                warn!("Failed to load robots.txt from {}: {}", robots_url, e);
                PolicyGate::AllowAll
            }
        }
    }

    pub fn allowed(&self, url: &str) -> bool {
        match self {
            PolicyGate::AllowAll => true,
            PolicyGate::DenyAll => false,
            PolicyGate::Rules(robot) => robot.allowed(url),
        }
    }
}

// "Mozilla/5.0 (Windows NT ...)" -> "Mozilla"
fn product_token(user_agent: &str) -> &str {
    user_agent
        .split('/')
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .unwrap_or(user_agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use crate::fetch::mock::MockTransport;
    use crate::fetch::TransportError;

    const ROBOTS_URL: &str = "https://example.test/robots.txt";

    #[test]
    fn test_product_token() {
        assert_eq!(product_token(DEFAULT_USER_AGENT), "Mozilla");
        assert_eq!(product_token("title-crawler"), "title-crawler");
        assert_eq!(product_token("mybot/1.0"), "mybot");
    }

    #[test]
    fn test_disallowed_path() {
        let gate = PolicyGate::from_robots_txt(
            DEFAULT_USER_AGENT,
            "User-agent: *\nDisallow: /private/\n",
        );
        assert!(!gate.allowed("https://example.test/private/page"));
        assert!(gate.allowed("https://example.test/public"));
        assert!(gate.allowed("https://example.test"));
    }

    #[test]
    fn test_agent_specific_group() {
        let gate = PolicyGate::from_robots_txt(
            DEFAULT_USER_AGENT,
            "User-agent: Mozilla\nDisallow: /\n\nUser-agent: *\nAllow: /\n",
        );
        assert!(!gate.allowed("https://example.test/anything"));
    }

    #[tokio::test]
    async fn test_load_parses_rules() {
        let transport = MockTransport::new().robots(ROBOTS_URL, "User-agent: *\nDisallow: /admin");
        let gate = PolicyGate::load(&transport, ROBOTS_URL, DEFAULT_USER_AGENT).await;
        assert!(!gate.allowed("https://example.test/admin"));
        assert!(gate.allowed("https://example.test/about"));
    }

    #[tokio::test]
    async fn test_missing_robots_allows_all() {
        let transport = MockTransport::new();
        let gate = PolicyGate::load(&transport, ROBOTS_URL, DEFAULT_USER_AGENT).await;
        assert!(gate.allowed("https://example.test/admin"));
        assert_eq!(transport.request_count(ROBOTS_URL), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_allows_all() {
        let transport = MockTransport::new()
            .error(ROBOTS_URL, TransportError::Connect("dns error".to_string()));
        let gate = PolicyGate::load(&transport, ROBOTS_URL, DEFAULT_USER_AGENT).await;
        assert!(gate.allowed("https://example.test/anything"));
    }

    #[tokio::test]
    async fn test_forbidden_robots_denies_all() {
        let transport = MockTransport::new().status(ROBOTS_URL, 403);
        let gate = PolicyGate::load(&transport, ROBOTS_URL, DEFAULT_USER_AGENT).await;
        assert!(!gate.allowed("https://example.test"));
    }
}
