#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use openfeature_mcp::config::ServerConfig;
use openfeature_mcp::context::ToolContext;
use openfeature_mcp::ofrep::config::CONFIG_PATH_ENV;
use openfeature_mcp::ofrep::{OfrepClient, OfrepHttpRequest, OfrepHttpResponse, TransportError};

/// Records every request and answers each with the same canned reply.
pub struct MockOfrepClient {
    calls: Mutex<Vec<OfrepHttpRequest>>,
    reply: Result<OfrepHttpResponse, TransportError>,
}

impl MockOfrepClient {
    pub fn replying(status: u16, content_type: Option<&str>, body: &str) -> Self {
        Self::with_reply(Ok(OfrepHttpResponse {
            status,
            etag: None,
            content_type: content_type.map(String::from),
            body: body.to_string(),
        }))
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::replying(status, Some("application/json"), &body.to_string())
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(TransportError(message.to_string())))
    }

    pub fn with_reply(reply: Result<OfrepHttpResponse, TransportError>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<OfrepHttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OfrepClient for MockOfrepClient {
    async fn send(&self, request: OfrepHttpRequest) -> Result<OfrepHttpResponse, TransportError> {
        self.calls.lock().unwrap().push(request);
        self.reply.clone()
    }
}

/// An environment map whose config file path points into `dir`, so the
/// developer's real home directory is never consulted.
pub fn isolated_env(dir: &Path, pairs: &[(&str, &str)]) -> HashMap<String, String> {
    let mut env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.entry(CONFIG_PATH_ENV.to_string())
        .or_insert_with(|| dir.join("missing.json").display().to_string());
    env
}

pub fn test_context(
    env: HashMap<String, String>,
    client: Arc<MockOfrepClient>,
) -> Arc<ToolContext> {
    Arc::new(ToolContext::with_parts(
        ServerConfig::default(),
        Arc::new(env),
        client,
    ))
}
