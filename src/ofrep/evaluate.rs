use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use url::Url;

use super::client::{OfrepClient, OfrepHttpRequest, OfrepHttpResponse};
use super::config::OfrepConfig;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// One evaluation as requested by the caller.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    /// Non-empty selects single-flag mode; otherwise bulk.
    pub flag_key: Option<String>,
    pub context: Option<Map<String, Value>>,
    /// Sent as `If-None-Match`, bulk mode only.
    pub etag: Option<String>,
    pub timeout: Option<Duration>,
}

impl EvaluationRequest {
    pub fn single_flag_key(&self) -> Option<&str> {
        self.flag_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn is_bulk(&self) -> bool {
        self.single_flag_key().is_none()
    }
}

/// Normalized outcome of an OFREP call.
///
/// A result with only `error` set is a connection-level failure; upstream
/// HTTP errors carry their `status`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OfrepResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(rename = "notModified", skip_serializing_if = "std::ops::Not::not")]
    pub not_modified: bool,
}

impl OfrepResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(Value::String(message.into())),
            ..Self::default()
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status.is_none() && self.error.is_some()
    }
}

/// `.` and `..` cannot be carried as a URL path segment: URL parsing
/// collapses them, which would silently turn a single-flag call into a bulk
/// one.
pub fn is_unaddressable_flag_key(key: &str) -> bool {
    key == "." || key == ".."
}

/// `{base}/ofrep/v1/evaluate/flags`, plus the percent-encoded flag key in
/// single-flag mode. Trailing slashes on the base are tolerated.
pub fn endpoint_url(base_url: &str, flag_key: Option<&str>) -> Result<Url, String> {
    if let Some(key) = flag_key.filter(|k| is_unaddressable_flag_key(k)) {
        return Err(format!("Flag key '{key}' cannot be used in an OFREP URL"));
    }
    let mut url = Url::parse(base_url)
        .map_err(|e| format!("Invalid OFREP base URL '{base_url}': {e}"))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| format!("Invalid OFREP base URL '{base_url}': cannot be a base"))?;
        segments
            .pop_if_empty()
            .extend(["ofrep", "v1", "evaluate", "flags"]);
        if let Some(key) = flag_key {
            segments.push(key);
        }
    }
    Ok(url)
}

/// Auth headers for `config`. A bearer token, when present, is the only
/// credential sent.
pub fn auth_headers(config: &OfrepConfig) -> Vec<(String, String)> {
    if let Some(token) = &config.bearer_token {
        return vec![("authorization".to_string(), format!("Bearer {token}"))];
    }
    if let Some(key) = &config.api_key {
        return vec![(API_KEY_HEADER.to_string(), key.clone())];
    }
    Vec::new()
}

pub fn build_request(
    config: &OfrepConfig,
    request: &EvaluationRequest,
) -> Result<OfrepHttpRequest, String> {
    let url = endpoint_url(&config.base_url, request.single_flag_key())?;

    let mut headers = vec![
        ("content-type".to_string(), "application/json".to_string()),
        ("accept".to_string(), "application/json".to_string()),
    ];
    headers.extend(auth_headers(config));
    if request.is_bulk() {
        if let Some(etag) = request.etag.as_deref().filter(|e| !e.is_empty()) {
            headers.push(("if-none-match".to_string(), etag.to_string()));
        }
    }

    let context = request.context.clone().unwrap_or_default();

    Ok(OfrepHttpRequest {
        url,
        headers,
        body: json!({ "context": context }),
        timeout: request.timeout,
    })
}

/// Perform one OFREP evaluation. Never fails: every outcome, including
/// connection errors, is folded into the returned [`OfrepResult`].
pub async fn evaluate(
    client: &dyn OfrepClient,
    config: &OfrepConfig,
    request: &EvaluationRequest,
) -> OfrepResult {
    let http_request = match build_request(config, request) {
        Ok(r) => r,
        Err(message) => return OfrepResult::failure(message),
    };
    let bulk = request.is_bulk();

    debug!(url = %http_request.url, bulk, "sending OFREP evaluation");

    match client.send(http_request).await {
        Ok(response) => interpret_response(response, bulk),
        Err(e) => {
            warn!(error = %e, "OFREP request failed");
            OfrepResult::failure(e.0)
        }
    }
}

fn interpret_response(response: OfrepHttpResponse, bulk: bool) -> OfrepResult {
    if bulk && response.status == 304 {
        return OfrepResult {
            status: Some(304),
            etag: response.etag,
            not_modified: true,
            ..OfrepResult::default()
        };
    }

    let payload = parse_body(&response);

    if !(200..300).contains(&response.status) {
        debug!(status = response.status, "OFREP returned an error status");
        return OfrepResult {
            status: Some(response.status),
            error: Some(payload),
            ..OfrepResult::default()
        };
    }

    OfrepResult {
        status: Some(response.status),
        etag: if bulk { response.etag } else { None },
        data: Some(payload),
        ..OfrepResult::default()
    }
}

// JSON when the server says so and the body agrees, raw text otherwise.
fn parse_body(response: &OfrepHttpResponse) -> Value {
    if is_json(response.content_type.as_deref()) {
        if let Ok(value) = serde_json::from_str(&response.body) {
            return value;
        }
    }
    Value::String(response.body.clone())
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        .unwrap_or(false)
}
