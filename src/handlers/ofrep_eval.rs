use std::time::Duration;

use tracing::{debug, error};

use crate::context::ToolContext;
use crate::ofrep::{self, EvaluationRequest, OfrepOverrides};
use crate::protocol::{McpErrorCode, McpErrorResponse, OfrepFlagEvalParams, ToolResult};

/// Handle an `ofrep_flag_eval` tool call.
///
/// Resolves the OFREP settings for this call, then sends exactly one
/// evaluation request. A missing base URL fails before any network I/O.
/// Upstream HTTP errors come back as ordinary results carrying the status;
/// only connection-level failures are flagged `isError`.
pub async fn handle(params: OfrepFlagEvalParams, ctx: &ToolContext) -> ToolResult {
    if let Some(key) = params.flag_key.as_deref() {
        if ofrep::is_unaddressable_flag_key(key) {
            let reason = format!("flag_key '{key}' is not a valid flag key");
            return super::invalid_arguments(super::tools::OFREP_EVAL_TOOL, reason);
        }
    }

    let auth = params.auth.unwrap_or_default();
    let overrides = OfrepOverrides {
        base_url: params.base_url,
        bearer_token: auth.bearer_token,
        api_key: auth.api_key,
    };

    let config = match ofrep::resolve_ofrep_config(&overrides, ctx.env.as_ref()) {
        Ok(c) => c,
        Err(err) => {
            debug!(error = %err, "OFREP configuration missing");
            return McpErrorResponse::from(err).into();
        }
    };

    let request = EvaluationRequest {
        flag_key: params.flag_key,
        context: params.context,
        etag: params.etag,
        timeout: params
            .timeout_ms
            .map(Duration::from_millis)
            .or(ctx.config.ofrep_timeout),
    };

    let result = ofrep::evaluate(ctx.ofrep_client.as_ref(), &config, &request).await;

    let text = match serde_json::to_string_pretty(&result) {
        Ok(t) => t,
        Err(e) => {
            error!("Serialization failed: {e}");
            return McpErrorResponse::canonical(McpErrorCode::InternalError).into();
        }
    };

    if result.is_transport_failure() {
        ToolResult::error(text)
    } else {
        ToolResult::text(text)
    }
}
