// src/fetch/transport.rs
// =============================================================================
// This module issues the actual HTTP requests.
//
// Key functionality:
// - A small Transport trait: "GET this URL, give me status/content-type/body"
// - HttpTransport: the real implementation on top of one reqwest Client
// - TransportError: categorizes reqwest failures (timeout, DNS, redirects...)
//
// Why a trait?
// - The crawl engine does not care where bytes come from
// - Tests plug in a fake transport and never touch the network
//
// Rust concepts:
// - Traits: Shared behavior that several types can implement
// - async-trait: async fn inside a trait
// - thiserror: derive Display/Error for our error enum
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

// Everything the crawler needs from one HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code (200, 404, ...)
    pub status: u16,
    /// Raw Content-Type header value, if the server sent one
    pub content_type: Option<String>,
    /// Undecoded response body
    pub body: Vec<u8>,
}

// Ways a request can fail before we get a response
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("too many redirects")]
    TooManyRedirects,
    /// The request could not even be built (bad URL, bad header...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Other(String),
}

// Converts a reqwest error into our own categories
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure / refused connection
// - Redirect loop
// - A URL reqwest refuses to request
impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_redirect() {
            TransportError::TooManyRedirects
        } else if error.is_builder() {
            TransportError::InvalidRequest(error.to_string())
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

// The HTTP collaborator: one GET per call, no retries
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

// Real transport backed by a single reqwest Client
//
// The client is built once per run with the user agent and timeout baked in,
// so every request (pages and robots.txt) carries the same headers and
// shares one connection pool.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Parameters:
    //   user_agent: sent as the User-Agent header on every request
    //   timeout: applies to the whole request (connect + body)
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        // Read the raw bytes; decoding is the classifier's job
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why bytes() instead of text()?
//    - text() decodes using the charset from the Content-Type header and
//      falls back to UTF-8
//    - Many pages lie about (or omit) their charset, so we keep the raw bytes
//      and guess the encoding from the content later
//
// 2. Why is the trait Send + Sync?
//    - async-trait boxes the returned future as Send by default
//    - The engine only holds a shared reference to the transport
//
// 3. What does the ? operator do with reqwest::Error here?
//    - It calls From<reqwest::Error> for TransportError automatically
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_builds() {
        let transport = HttpTransport::new("title-crawler-test", Duration::from_secs(1));
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_not_a_connection_error() {
        let transport = HttpTransport::new("title-crawler-test", Duration::from_secs(1)).unwrap();
        let err = transport.get("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
        assert_eq!(
            TransportError::Connect("refused".to_string()).to_string(),
            "connection failed: refused"
        );
    }

    #[tokio::test]
    async fn test_closed_port_is_a_connection_error() {
        // Port 1 on loopback has no listener, so the connection is refused
        let transport = HttpTransport::new("title-crawler-test", Duration::from_secs(5)).unwrap();
        let err = transport.get("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "got {:?}", err);
    }
}
