pub mod request;
pub mod response;

pub use request::{
    ClientInfo, InitializeParams, InstallGuideParams, JsonRpcRequest, OfrepAuthParams,
    OfrepFlagEvalParams, RpcId, ToolCallParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ToolResult,
    ToolResultContent,
};
