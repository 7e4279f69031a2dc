//! MCP server for OpenFeature.
//!
//! Exposes `install_openfeature_sdk` (bundled SDK install guides with
//! provider-specific instructions) and `ofrep_flag_eval` (a single-call proxy
//! to an OFREP flag evaluation service) over JSON-RPC 2.0, on stdio or HTTP.

pub mod config;
pub mod context;
pub mod guides;
pub mod handlers;
pub mod http;
pub mod ofrep;
pub mod protocol;
pub mod server;

pub mod schema;
