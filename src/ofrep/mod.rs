//! OpenFeature Remote Evaluation Protocol (OFREP) proxy.
//!
//! Settings are resolved per call ([`config`]), one POST is sent through an
//! [`OfrepClient`] and the response is normalized into an [`OfrepResult`].
//! Nothing is cached or retried.

pub mod client;
pub mod config;
pub mod evaluate;

pub use client::{OfrepClient, OfrepHttpRequest, OfrepHttpResponse, ReqwestClient, TransportError};
pub use config::{
    config_file_path, resolve_ofrep_config, EnvSource, OfrepConfig, OfrepConfigError,
    OfrepOverrides, ProcessEnv,
};
pub use evaluate::{evaluate, is_unaddressable_flag_key, EvaluationRequest, OfrepResult};
