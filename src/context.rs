use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ofrep::{EnvSource, OfrepClient, ProcessEnv, ReqwestClient, TransportError};

/// Everything a tool call may touch. Shared read-only between concurrent calls.
#[derive(Clone)]
pub struct ToolContext {
    pub config: ServerConfig,
    pub env: Arc<dyn EnvSource>,
    pub ofrep_client: Arc<dyn OfrepClient>,
}

impl ToolContext {
    /// Production wiring: process environment and a `reqwest` client.
    pub fn new(config: ServerConfig) -> Result<Self, TransportError> {
        Ok(Self {
            config,
            env: Arc::new(ProcessEnv),
            ofrep_client: Arc::new(ReqwestClient::new()?),
        })
    }

    pub fn with_parts(
        config: ServerConfig,
        env: Arc<dyn EnvSource>,
        ofrep_client: Arc<dyn OfrepClient>,
    ) -> Self {
        Self {
            config,
            env,
            ofrep_client,
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
