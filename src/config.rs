use std::net::SocketAddr;
use std::time::Duration;

use crate::ofrep::{EnvSource, ProcessEnv};

/// Default bind address for the HTTP transport.
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENFEATURE_MCP_TRANSPORT must be `stdio` or `http`, got `{0}`")]
    InvalidTransport(String),
    #[error("OPENFEATURE_MCP_HTTP_ADDR is not a valid socket address: `{0}`")]
    InvalidHttpAddr(String),
    #[error("OPENFEATURE_MCP_OFREP_TIMEOUT_MS must be a positive integer, got `{0}`")]
    InvalidTimeout(String),
}

/// How MCP messages reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http(SocketAddr),
}

/// Server configuration loaded from environment variables.
///
/// OFREP connection settings are not part of it: they are resolved on every
/// tool call (see [`crate::ofrep::resolve_ofrep_config`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transport: Transport,
    /// Default timeout for outbound OFREP requests; `None` waits indefinitely.
    pub ofrep_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            ofrep_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `OPENFEATURE_MCP_TRANSPORT` (optional, `stdio` | `http`, default `stdio`)
    /// - `OPENFEATURE_MCP_HTTP_ADDR` (optional, default `127.0.0.1:3000`)
    /// - `OPENFEATURE_MCP_OFREP_TIMEOUT_MS` (optional): default OFREP request timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(env: &dyn EnvSource) -> Result<Self, ConfigError> {
        let transport = match env.var("OPENFEATURE_MCP_TRANSPORT").as_deref() {
            None | Some("") | Some("stdio") => Transport::Stdio,
            Some("http") => {
                let raw = env
                    .var("OPENFEATURE_MCP_HTTP_ADDR")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
                let addr = raw
                    .parse::<SocketAddr>()
                    .map_err(|_| ConfigError::InvalidHttpAddr(raw.clone()))?;
                Transport::Http(addr)
            }
            Some(other) => return Err(ConfigError::InvalidTransport(other.to_string())),
        };

        let ofrep_timeout = match env.var("OPENFEATURE_MCP_OFREP_TIMEOUT_MS") {
            Some(val) if !val.is_empty() => match val.parse::<u64>() {
                Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => return Err(ConfigError::InvalidTimeout(val)),
            },
            _ => None,
        };

        Ok(Self {
            transport,
            ofrep_timeout,
        })
    }
}
