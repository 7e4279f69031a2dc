pub mod install_guide;
pub mod ofrep_eval;
pub mod tools;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::context::ToolContext;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode,
    McpErrorResponse, ToolCallParams, ToolResult,
};
use crate::schema::validate_json;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "openfeature-mcp";

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, ctx: &Arc<ToolContext>) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            if let Some(params) = req
                .params
                .clone()
                .and_then(|v| serde_json::from_value::<InitializeParams>(v).ok())
            {
                let client = params.client_info.as_ref();
                info!(
                    client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "client initializing"
                );
            }
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(
            req.id.clone(),
            tools::tool_definitions(),
        )),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(params, ctx).await;
            match serde_json::to_value(&tool_result) {
                Ok(result_json) => Some(JsonRpcResponse::success(req.id.clone(), result_json)),
                Err(e) => Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::internal_error(format!("Cannot encode tool result: {e}")),
                )),
            }
        }

        _ if req.id.is_none() => {
            debug!(method = %req.method, "ignoring unknown notification");
            None
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run one tool call on its own task so that a panic inside a tool becomes an
/// `internal_error` result instead of taking the server down.
async fn dispatch_tool_call(params: ToolCallParams, ctx: &Arc<ToolContext>) -> ToolResult {
    let name = params.name.clone();
    let ctx = Arc::clone(ctx);
    let task = tokio::spawn(async move { run_tool(params, &ctx).await });

    match task.await {
        Ok(result) => result,
        Err(join_err) => {
            error!(tool = %name, "Tool task failed: {join_err}");
            McpErrorResponse::canonical(McpErrorCode::InternalError).into()
        }
    }
}

async fn run_tool(params: ToolCallParams, ctx: &ToolContext) -> ToolResult {
    let Some(schema) = tools::input_schema(&params.name) else {
        return McpErrorResponse::new(
            McpErrorCode::UnknownTool,
            format!("Unknown tool: {}", params.name),
        )
        .into();
    };

    let arguments = params.arguments.unwrap_or_else(|| Value::Object(Default::default()));
    if let Err(e) = validate_json(&schema, &arguments) {
        return invalid_arguments(&params.name, e);
    }

    debug!(tool = %params.name, "tool call");

    match params.name.as_str() {
        tools::INSTALL_GUIDE_TOOL => match parse_arguments(&params.name, arguments) {
            Ok(p) => install_guide::handle(p).await,
            Err(result) => result,
        },
        tools::OFREP_EVAL_TOOL => match parse_arguments(&params.name, arguments) {
            Ok(p) => ofrep_eval::handle(p, ctx).await,
            Err(result) => result,
        },
        _ => McpErrorResponse::canonical(McpErrorCode::UnknownTool).into(),
    }
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolResult> {
    serde_json::from_value(arguments).map_err(|e| invalid_arguments(tool, e))
}

pub(crate) fn invalid_arguments(tool: &str, err: impl std::fmt::Display) -> ToolResult {
    McpErrorResponse::new(
        McpErrorCode::InvalidArguments,
        format!("Invalid arguments for {tool}: {err}"),
    )
    .into()
}
