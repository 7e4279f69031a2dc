//! JSON-RPC over HTTP: one request per `POST /mcp`, answered in the response
//! body. There is no session, so no initialization gate.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::context::ToolContext;
use crate::handlers;
use crate::protocol::JsonRpcRequest;
use crate::server::MAX_MESSAGE_BYTES;

pub fn router(ctx: Arc<ToolContext>) -> Router {
    Router::new()
        .route("/mcp", post(handle_rpc))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_BYTES))
        .with_state(ctx)
}

pub async fn serve(
    addr: SocketAddr,
    ctx: Arc<ToolContext>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "serving MCP over HTTP");
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn handle_rpc(State(ctx): State<Arc<ToolContext>>, body: String) -> Response {
    let req = match JsonRpcRequest::parse(&body) {
        Ok(r) => r,
        Err(resp) => return Json(resp).into_response(),
    };

    match handlers::dispatch(&req, &ctx).await {
        Some(resp) => Json(resp).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
