// src/fetch/mod.rs
// =============================================================================
// This module fetches pages and decides what happened to each one.
//
// Submodules:
// - transport: Makes the HTTP GET requests (reqwest)
// - html: Decodes bodies, strips comments, parses HTML, reads <title>
// - classify: Turns one request into one FetchOutcome
//
// Rust concepts:
// - pub use: Re-export items so callers write fetch::FetchOutcome
// - #[cfg(test)]: Code that only exists when running tests
// =============================================================================

mod classify;
mod html;
mod transport;

#[cfg(test)]
pub mod mock;

pub use classify::{fetch_and_classify, FetchOutcome};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub use transport::TransportError;
