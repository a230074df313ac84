// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl loop with a breadth-first approach.
//
// How it works:
// 1. Start with the normalized seed URL in a queue (the "frontier")
// 2. Pop the oldest URL
// 3. Skip it if its extension is excluded or robots.txt disallows it
// 4. Fetch and classify it
// 5. On success, record its title and queue every new same-domain link
// 6. Wait a little, then repeat until the queue is empty or the page budget
//    is used up
//
// Invariants:
// - A URL enters `seen` the moment it is queued, so it is queued (and
//   fetched) at most once
// - Only successful fetches count against the budget
// - One page failing never stops the crawl
//
// Rust concepts:
// - HashSet: To track every URL ever queued (O(1) lookup)
// - VecDeque: FIFO queue for breadth-first crawling
// - Generics: The engine works with any Transport (real or mock)
// =============================================================================

use super::links::extract_links;
use super::url_filter::{is_excluded_extension, normalize_url};
use crate::config::CrawlConfig;
use crate::fetch::{fetch_and_classify, FetchOutcome, Transport};
use crate::robots::PolicyGate;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};

// Where the engine is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    Idle,
    Running,
    /// Stopped because the page budget was reached
    Completed,
    /// Stopped because there was nothing left to visit
    Exhausted,
}

// One collected page: normalized URL and its title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTitle {
    pub url: String,
    pub title: String,
}

// How many URLs ended in each outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub fetched: usize,
    pub skipped_extension: usize,
    pub skipped_robots: usize,
    pub skipped_status: usize,
    pub skipped_content_type: usize,
    pub failed_transport: usize,
    pub failed_other: usize,
}

impl CrawlStats {
    fn record(&mut self, outcome: &FetchOutcome) {
        let counter = match outcome {
            FetchOutcome::Fetched { .. } => &mut self.fetched,
            FetchOutcome::SkippedExtension => &mut self.skipped_extension,
            FetchOutcome::SkippedRobots => &mut self.skipped_robots,
            FetchOutcome::SkippedStatus(_) => &mut self.skipped_status,
            FetchOutcome::SkippedContentType(_) => &mut self.skipped_content_type,
            FetchOutcome::FailedTransport(_) => &mut self.failed_transport,
            FetchOutcome::FailedOther(_) => &mut self.failed_other,
        };
        *counter += 1;
    }
}

// Everything a finished run hands back
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub state: CrawlState,
    /// Collected titles in visit order (one entry per URL)
    pub pages: Vec<PageTitle>,
    pub stats: CrawlStats,
    /// URLs still waiting in the frontier when the run stopped
    pub pending: Vec<String>,
}

#[cfg(test)]
impl CrawlReport {
    pub fn title_of(&self, url: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| page.url == url)
            .map(|page| page.title.as_str())
    }
}

// The crawl engine: owns the frontier, the seen-set and the results
//
// The transport is borrowed so the caller keeps ownership of the client.
pub struct Crawler<'a, T: ?Sized> {
    config: CrawlConfig,
    transport: &'a T,
    policy: Option<PolicyGate>,
    frontier: VecDeque<String>,
    seen: HashSet<String>,
    pages: Vec<PageTitle>,
    stats: CrawlStats,
    state: CrawlState,
}

impl<'a, T> Crawler<'a, T>
where
    T: Transport + ?Sized,
{
    // Creates an idle crawler with the seed already queued
    //
    // robots.txt is loaded when run() starts (tests may supply a gate with
    // with_policy()).
    pub fn new(config: CrawlConfig, transport: &'a T) -> Self {
        let mut crawler = Self {
            config,
            transport,
            policy: None,
            frontier: VecDeque::new(),
            seen: HashSet::new(),
            pages: Vec::new(),
            stats: CrawlStats::default(),
            state: CrawlState::Idle,
        };

        let seed = normalize_url(crawler.config.seed.as_str());
        crawler.enqueue(seed);
        crawler
    }

    #[cfg(test)]
    pub fn with_policy(mut self, policy: PolicyGate) -> Self {
        self.policy = Some(policy);
        self
    }

    // Runs the crawl to completion and returns the report
    pub async fn run(mut self) -> CrawlReport {
        self.state = CrawlState::Running;

        info!("--- Crawl started ---");
        info!("Target domain: {}", self.config.base_domain());
        info!("Max pages: {}", self.config.max_pages);

        if self.policy.is_none() {
            // A zero budget must not touch the network at all, not even robots.txt
            let gate = if self.config.max_pages == 0 {
                PolicyGate::allow_all()
            } else {
                let robots_url = self.config.robots_url();
                PolicyGate::load(self.transport, &robots_url, &self.config.user_agent).await
            };
            self.policy = Some(gate);
        }

        loop {
            if self.pages.len() >= self.config.max_pages {
                self.state = CrawlState::Completed;
                break;
            }

            let Some(url) = self.frontier.pop_front() else {
                self.state = CrawlState::Exhausted;
                break;
            };

            if let Some(skip) = self.gate(&url) {
                // Pre-fetch skips go straight to the next URL, no delay
                self.stats.record(&skip);
                continue;
            }

            info!(
                "Processing [{}/{}]: {}",
                self.pages.len() + 1,
                self.config.max_pages,
                url
            );
            let outcome = fetch_and_classify(self.transport, &url).await;
            self.stats.record(&outcome);
            self.handle_fetch(&url, outcome);

            self.pause().await;
        }

        info!(
            "--- Crawl finished ({:?}): {} page(s) ---",
            self.state,
            self.pages.len()
        );

        CrawlReport {
            state: self.state,
            pages: self.pages,
            stats: self.stats,
            pending: self.frontier.into_iter().collect(),
        }
    }

    // Checks extension and robots.txt before fetching
    //
    // Returns Some(outcome) if the URL must be skipped without a request.
    fn gate(&self, url: &str) -> Option<FetchOutcome> {
        if is_excluded_extension(url, &self.config.excluded_extensions) {
            debug!("Skipped by extension: {}", url);
            return Some(FetchOutcome::SkippedExtension);
        }

        let allowed = self.policy.as_ref().map_or(true, |gate| gate.allowed(url));
        if !allowed {
            info!("Skipped by robots.txt: {}", url);
            return Some(FetchOutcome::SkippedRobots);
        }

        None
    }

    // Records a successful page and queues its links; logs everything else
    //
    // The parsed document is dropped here so it never lives across an await.
    fn handle_fetch(&mut self, url: &str, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Fetched { title, document } => {
                debug!("Title of {}: {}", url, title);
                self.pages.push(PageTitle {
                    url: url.to_string(),
                    title,
                });

                let mut queued = 0;
                for link in extract_links(url, &document, &self.config) {
                    if self.enqueue(link) {
                        queued += 1;
                    }
                }
                debug!("Queued {} new link(s) from {}", queued, url);
            }
            FetchOutcome::FailedTransport(_) | FetchOutcome::FailedOther(_) => {
                warn!("    {}", outcome);
            }
            other => info!("    {}", other),
        }
    }

    // The only place URLs enter the frontier
    //
    // Returns true if the URL was new. Marking it seen here (not after the
    // fetch) is what keeps two pages linking to the same target from queueing
    // it twice.
    fn enqueue(&mut self, url: String) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.frontier.push_back(url);
        true
    }

    // Politeness delay between fetches; skipped when the run is about to end
    async fn pause(&self) {
        let more_work = !self.frontier.is_empty() && self.pages.len() < self.config.max_pages;
        if more_work && !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why mark URLs as seen when queueing instead of when fetching?
//    - Page A and page B may both link to C before C is fetched
//    - If we only marked C after fetching, it would sit in the queue twice
//
// 2. Why don't skips count against the budget?
//    - The budget is "titles collected", so only Fetched pages consume it
//
// 3. Why is breadth-first order guaranteed?
//    - VecDeque: push_back() adds to the end, pop_front() takes the oldest
//    - Every link found on a depth-k page is queued behind all depth-k pages
// -----------------------------------------------------------------------------
