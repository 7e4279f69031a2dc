use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use url::Url;

/// A fully built OFREP request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct OfrepHttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Option<Duration>,
}

impl OfrepHttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The parts of an OFREP response the proxy looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OfrepHttpResponse {
    pub status: u16,
    pub etag: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Connection-level failure: nothing usable came back from the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a single OFREP request. Implementations must not retry.
#[async_trait]
pub trait OfrepClient: Send + Sync {
    async fn send(&self, request: OfrepHttpRequest) -> Result<OfrepHttpResponse, TransportError>;
}

/// [`OfrepClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("openfeature-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError(error_chain(&e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OfrepClient for ReqwestClient {
    async fn send(&self, request: OfrepHttpRequest) -> Result<OfrepHttpResponse, TransportError> {
        let body = serde_json::to_vec(&request.body)
            .map_err(|e| TransportError(format!("Cannot encode request body: {e}")))?;
        let mut builder = self.client.post(request.url).body(body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| describe(&e, request.timeout))?;

        let status = response.status().as_u16();
        let etag = header_string(response.headers(), header::ETAG);
        let content_type = header_string(response.headers(), header::CONTENT_TYPE);
        let body = response
            .text()
            .await
            .map_err(|e| describe(&e, request.timeout))?;

        Ok(OfrepHttpResponse {
            status,
            etag,
            content_type,
            body,
        })
    }
}

fn header_string(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn describe(err: &reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if err.is_timeout() {
        if let Some(timeout) = timeout {
            return TransportError(format!(
                "Request timed out after {} ms",
                timeout.as_millis()
            ));
        }
    }
    TransportError(error_chain(err))
}

// reqwest hides the OS-level reason ("Connection refused") in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
