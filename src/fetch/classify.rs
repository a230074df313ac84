// src/fetch/classify.rs
// =============================================================================
// This module decides what happened to one URL.
//
// Given a URL, we make exactly one GET request and sort the result into a
// FetchOutcome:
// - Fetched: status 200, Content-Type contains text/html, parsed fine
// - SkippedStatus: anything other than 200
// - SkippedContentType: not an HTML page (images, JSON, ...)
// - FailedTransport: timeout, DNS, refused connection, redirect loop
// - FailedOther: anything else that went wrong for this page
//
// The two pre-fetch skips (SkippedExtension, SkippedRobots) are produced by
// the crawl engine before it ever calls us.
//
// Nothing here returns Err or panics: one bad page must never stop the crawl.
// =============================================================================

use super::html::{extract_title, parse_document};
use super::transport::{Transport, TransportError};
use crate::config::NO_TITLE;
use scraper::Html;
use std::fmt;

// The result of visiting one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTML page with status 200; the document is kept for link extraction
    Fetched { title: String, document: Html },
    /// Path ends with an excluded file extension (never fetched)
    SkippedExtension,
    /// robots.txt disallows the URL (never fetched)
    SkippedRobots,
    /// Non-200 status code
    SkippedStatus(u16),
    /// Content-Type without text/html (lower-cased, may be empty)
    SkippedContentType(String),
    /// Network-level failure
    FailedTransport(String),
    /// Any other per-page failure
    FailedOther(String),
}

// Short human-readable reason, used in the progress stream
impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Fetched { title, .. } => write!(f, "fetched: {}", title),
            FetchOutcome::SkippedExtension => write!(f, "skipped (extension)"),
            FetchOutcome::SkippedRobots => write!(f, "skipped (robots.txt)"),
            FetchOutcome::SkippedStatus(code) => write!(f, "skipped (status): {}", code),
            FetchOutcome::SkippedContentType(value) => {
                write!(f, "skipped (content-type): {}", value)
            }
            FetchOutcome::FailedTransport(detail) => write!(f, "error (request): {}", detail),
            FetchOutcome::FailedOther(detail) => write!(f, "error (other): {}", detail),
        }
    }
}

// Fetches one URL and classifies the response
//
// Parameters:
//   transport: anything that can perform a GET (real client or test mock)
//   url: the (already normalized) URL to fetch
//
// Returns: exactly one FetchOutcome, never an error
pub async fn fetch_and_classify<T>(transport: &T, url: &str) -> FetchOutcome
where
    T: Transport + ?Sized,
{
    let response = match transport.get(url).await {
        Ok(response) => response,
        // A request we could not even build is not a network problem
        Err(TransportError::InvalidRequest(detail)) => return FetchOutcome::FailedOther(detail),
        Err(e) => return FetchOutcome::FailedTransport(e.to_string()),
    };

    if response.status != 200 {
        return FetchOutcome::SkippedStatus(response.status);
    }

    let content_type = response
        .content_type
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    if !content_type.contains("text/html") {
        return FetchOutcome::SkippedContentType(content_type);
    }

    let document = parse_document(&response.body);

    match extract_title(&document) {
        Ok(title) => FetchOutcome::Fetched {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            document,
        },
        // No partial results: a page we could not read is a failure
        Err(detail) => FetchOutcome::FailedOther(detail),
    }
}
