//! Integration tests for JSON-RPC dispatch and the tool-call adapter.
//!
//! Tests drive `handlers::dispatch` directly with a test `ToolContext` whose
//! OFREP client records calls instead of touching the network.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use common::{isolated_env, test_context, MockOfrepClient};
use openfeature_mcp::config::ServerConfig;
use openfeature_mcp::context::ToolContext;
use openfeature_mcp::handlers;
use openfeature_mcp::ofrep::{OfrepClient, OfrepHttpRequest, OfrepHttpResponse, TransportError};
use openfeature_mcp::protocol::{JsonRpcRequest, JsonRpcResponse, RpcId};
use serde_json::{json, Value};

fn context(
    tmp: &tempfile::TempDir,
    pairs: &[(&str, &str)],
) -> (Arc<ToolContext>, Arc<MockOfrepClient>) {
    let client = Arc::new(MockOfrepClient::json(200, json!({"value": true})));
    let ctx = test_context(isolated_env(tmp.path(), pairs), client.clone());
    (ctx, client)
}

fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: Some(RpcId::Number(id)),
        method: method.into(),
        params,
    }
}

async fn call_tool(ctx: &Arc<ToolContext>, name: &str, arguments: Value) -> Value {
    let req = request(
        7,
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    );
    let response = handlers::dispatch(&req, ctx).await.unwrap();
    assert!(response.error.is_none(), "tool failures must not be JSON-RPC errors");
    response.result.unwrap()
}

fn error_code(result: &Value) -> String {
    assert_eq!(result["isError"], json!(true));
    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();
    parsed["error"]["code"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Protocol methods
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initialize_reports_server_info() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let req = request(
        1,
        "initialize",
        Some(json!({
            "protocolVersion": "2024-11-05",
            "clientInfo": {"name": "test", "version": "1"}
        })),
    );
    let result = handlers::dispatch(&req, &ctx).await.unwrap().result.unwrap();

    assert_eq!(result["protocolVersion"], json!("2024-11-05"));
    assert_eq!(result["serverInfo"]["name"], json!("openfeature-mcp"));
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn initialized_notification_has_no_response() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let req = JsonRpcRequest {
        jsonrpc: "2.0".into(),
        id: None,
        method: "notifications/initialized".into(),
        params: None,
    };
    assert!(handlers::dispatch(&req, &ctx).await.is_none());
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let response = handlers::dispatch(&request(2, "resources/list", None), &ctx)
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn tools_list_advertises_both_tools() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = handlers::dispatch(&request(3, "tools/list", None), &ctx)
        .await
        .unwrap()
        .result
        .unwrap();
    let tools = result["tools"].as_array().unwrap();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["install_openfeature_sdk", "ofrep_flag_eval"]);

    let guide_enum = tools[0]["inputSchema"]["properties"]["guide"]["enum"]
        .as_array()
        .unwrap();
    assert!(guide_enum.contains(&json!("go")));
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["guide"]));
}

#[tokio::test]
async fn tools_call_without_params_is_invalid_params() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let response = handlers::dispatch(&request(4, "tools/call", None), &ctx)
        .await
        .unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[test]
fn wrong_jsonrpc_version_is_rejected() {
    let resp: JsonRpcResponse =
        JsonRpcRequest::parse(r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#).unwrap_err();
    assert_eq!(resp.error.unwrap().code, -32600);
    assert_eq!(resp.id, Some(RpcId::Number(1)));
}

#[test]
fn garbage_is_a_parse_error() {
    let resp = JsonRpcRequest::parse("{nope").unwrap_err();
    assert_eq!(resp.error.unwrap().code, -32700);
}

// ---------------------------------------------------------------------------
// install_openfeature_sdk
// ---------------------------------------------------------------------------

#[tokio::test]
async fn install_guide_via_tools_call() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(
        &ctx,
        "install_openfeature_sdk",
        json!({"guide": "python", "providers": ["flagd"]}),
    )
    .await;

    assert!(result.get("isError").is_none());
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("# OpenFeature Python SDK"));
    assert!(text.contains("https://flagd.dev/providers/python/"));
}

#[tokio::test]
async fn install_guide_unknown_provider_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(
        &ctx,
        "install_openfeature_sdk",
        json!({"guide": "go", "providers": ["flagd", "acme"]}),
    )
    .await;

    assert_eq!(error_code(&result), "unknown_provider");
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Unrecognized provider: acme"));
    assert!(!text.contains("# OpenFeature"), "no partial guide text");
}

#[tokio::test]
async fn install_guide_unknown_guide_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(&ctx, "install_openfeature_sdk", json!({"guide": "fortran"})).await;

    assert_eq!(error_code(&result), "unknown_guide");
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Unrecognized guide: fortran"));
}

#[tokio::test]
async fn install_guide_wrongly_typed_providers_is_invalid() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(
        &ctx,
        "install_openfeature_sdk",
        json!({"guide": "go", "providers": "flagd"}),
    )
    .await;

    assert_eq!(error_code(&result), "invalid_arguments");
}

#[tokio::test]
async fn install_guide_missing_guide_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(&ctx, "install_openfeature_sdk", json!({})).await;
    assert_eq!(error_code(&result), "invalid_arguments");
}

#[tokio::test]
async fn unknown_tool_is_a_tool_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, _) = context(&tmp, &[]);

    let result = call_tool(&ctx, "evaluate_everything", json!({})).await;
    assert_eq!(error_code(&result), "unknown_tool");
}

// ---------------------------------------------------------------------------
// ofrep_flag_eval
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ofrep_eval_via_tools_call() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, client) = context(
        &tmp,
        &[("OPENFEATURE_OFREP_BASE_URL", "https://flags.example")],
    );

    let result = call_tool(
        &ctx,
        "ofrep_flag_eval",
        json!({"flag_key": "my-feature", "context": {"targetingKey": "user-123"}}),
    )
    .await;

    assert!(result.get("isError").is_none());
    let text = result["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed, json!({"status": 200, "data": {"value": true}}));

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].url.as_str(),
        "https://flags.example/ofrep/v1/evaluate/flags/my-feature"
    );
}

#[tokio::test]
async fn ofrep_eval_without_config_is_config_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, client) = context(&tmp, &[]);

    let result = call_tool(&ctx, "ofrep_flag_eval", json!({"flag_key": "x"})).await;

    assert_eq!(error_code(&result), "config_missing");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn ofrep_eval_rejects_wrongly_typed_context() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, client) = context(&tmp, &[("OFREP_BASE_URL", "https://flags.example")]);

    let result = call_tool(&ctx, "ofrep_flag_eval", json!({"context": "user-123"})).await;

    assert_eq!(error_code(&result), "invalid_arguments");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn ofrep_eval_rejects_dot_only_flag_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let (ctx, client) = context(&tmp, &[("OFREP_BASE_URL", "https://flags.example")]);

    for key in [".", ".."] {
        let result = call_tool(&ctx, "ofrep_flag_eval", json!({"flag_key": key})).await;
        assert_eq!(error_code(&result), "invalid_arguments");
    }
    assert_eq!(client.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Fault isolation
// ---------------------------------------------------------------------------

/// Panics on the first request and answers normally afterwards.
struct PanicOnceClient {
    sent: AtomicUsize,
}

#[async_trait]
impl OfrepClient for PanicOnceClient {
    async fn send(&self, _request: OfrepHttpRequest) -> Result<OfrepHttpResponse, TransportError> {
        if self.sent.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("client blew up");
        }
        Ok(OfrepHttpResponse {
            status: 200,
            etag: None,
            content_type: Some("application/json".into()),
            body: r#"{"value":true}"#.into(),
        })
    }
}

#[tokio::test]
async fn panicking_tool_becomes_internal_error_and_server_keeps_serving() {
    let tmp = tempfile::tempdir().unwrap();
    let env = isolated_env(tmp.path(), &[("OFREP_BASE_URL", "https://flags.example")]);
    let ctx = Arc::new(ToolContext::with_parts(
        ServerConfig::default(),
        Arc::new(env),
        Arc::new(PanicOnceClient {
            sent: AtomicUsize::new(0),
        }),
    ));

    let first = call_tool(&ctx, "ofrep_flag_eval", json!({"flag_key": "f"})).await;
    assert_eq!(error_code(&first), "internal_error");

    let second = call_tool(&ctx, "ofrep_flag_eval", json!({"flag_key": "f"})).await;
    assert!(second.get("isError").is_none());
    let text = second["content"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body, json!({"status": 200, "data": {"value": true}}));

    let listed = handlers::dispatch(&request(9, "tools/list", None), &ctx).await;
    assert!(listed.unwrap().result.is_some());
}
