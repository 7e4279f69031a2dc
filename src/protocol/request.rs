use serde::Deserialize;

use super::response::{JsonRpcError, JsonRpcResponse};

/// JSON-RPC 2.0 ID: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Decode one message, answering with the JSON-RPC error to send back when
    /// it is not a valid 2.0 request.
    pub fn parse(text: &str) -> Result<Self, JsonRpcResponse> {
        let req: JsonRpcRequest = serde_json::from_str(text).map_err(|e| {
            tracing::warn!(error = %e, "parse error");
            JsonRpcResponse::error(None, JsonRpcError::parse_error())
        })?;

        if req.jsonrpc != "2.0" {
            return Err(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::invalid_request(),
            ));
        }

        Ok(req)
    }
}

/// Parameters for the `install_openfeature_sdk` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallGuideParams {
    pub guide: String,
    #[serde(default)]
    pub providers: Vec<String>,
}

/// Credentials accepted on an `ofrep_flag_eval` call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfrepAuthParams {
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
}

/// Parameters for the `ofrep_flag_eval` tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfrepFlagEvalParams {
    pub base_url: Option<String>,
    pub flag_key: Option<String>,
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
    pub etag: Option<String>,
    pub auth: Option<OfrepAuthParams>,
    /// Overrides the server's default OFREP timeout for this call.
    pub timeout_ms: Option<u64>,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}
