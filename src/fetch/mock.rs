// src/fetch/mock.rs
// Test-only transport: canned responses per URL, plus a request counter so
// tests can assert that no URL is fetched twice.

use super::transport::{HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(mut self, url: &str, status: u16, content_type: Option<&str>, body: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                content_type: content_type.map(|v| v.to_string()),
                body: body.to_vec(),
            }),
        );
        self
    }

    pub fn html(self, url: &str, body: &str) -> Self {
        self.response(url, 200, Some("text/html; charset=utf-8"), body.as_bytes())
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.response(url, status, Some("text/html"), b"")
    }

    pub fn robots(self, url: &str, body: &str) -> Self {
        self.response(url, 200, Some("text/plain"), body.as_bytes())
    }

    pub fn error(mut self, url: &str, error: TransportError) -> Self {
        self.routes.insert(url.to_string(), Err(error));
        self
    }

    // Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());

        // Unknown URLs behave like a server answering 404
        self.routes.get(url).cloned().unwrap_or(Ok(HttpResponse {
            status: 404,
            content_type: Some("text/html".to_string()),
            body: Vec::new(),
        }))
    }
}
