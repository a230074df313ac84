// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-domain restriction (never leaves the seed's host)
// - Page budget: stops after collecting max_pages titles
// - Polite crawling: robots.txt and a delay between requests
//
// Submodules:
// - url_filter: URL normalization and the file-extension filter
// - links: Extracts same-domain links from a parsed page
// - engine: The frontier, the seen-set and the crawl loop
// =============================================================================

mod engine;
mod links;
mod url_filter;

pub use engine::{CrawlReport, Crawler};
