use tracing::debug;

use crate::guides;
use crate::protocol::{InstallGuideParams, McpErrorResponse, ToolResult};

/// Handle an `install_openfeature_sdk` tool call.
///
/// Returns the bundled guide as markdown with one instruction line per
/// requested provider. Any unknown id fails the call without partial output.
pub async fn handle(params: InstallGuideParams) -> ToolResult {
    match guides::install_guide(&params.guide, &params.providers) {
        Ok(markdown) => ToolResult::text(markdown),
        Err(err) => {
            debug!(error = %err, "install guide rejected");
            McpErrorResponse::from(err).into()
        }
    }
}
