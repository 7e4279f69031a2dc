use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "OPENFEATURE_MCP_CONFIG_PATH";
/// Config file name under the home directory, used when no override is set.
pub const DEFAULT_CONFIG_FILE: &str = ".openfeature-mcp.json";

/// Accepted spellings per field, preferred first.
pub const BASE_URL_ENV: [&str; 2] = ["OPENFEATURE_OFREP_BASE_URL", "OFREP_BASE_URL"];
pub const BEARER_TOKEN_ENV: [&str; 2] = ["OPENFEATURE_OFREP_BEARER_TOKEN", "OFREP_BEARER_TOKEN"];
pub const API_KEY_ENV: [&str; 2] = ["OPENFEATURE_OFREP_API_KEY", "OFREP_API_KEY"];

/// Read access to environment variables.
///
/// Production code uses [`ProcessEnv`]; tests can pass a plain map.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfrepConfigError {
    #[error(
        "OFREP base URL is not configured: pass base_url, set OPENFEATURE_OFREP_BASE_URL \
         (or OFREP_BASE_URL), or add OFREP.baseUrl to {config_path}"
    )]
    MissingBaseUrl { config_path: String },
}

/// Values supplied directly on a tool call. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct OfrepOverrides {
    pub base_url: Option<String>,
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
}

/// Resolved connection settings for one OFREP call.
#[derive(Clone, PartialEq, Eq)]
pub struct OfrepConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for OfrepConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfrepConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "OFREP")]
    ofrep: Option<FileSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileSection {
    base_url: Option<String>,
    bearer_token: Option<String>,
    api_key: Option<String>,
}

/// Path of the local config file: the override variable if set, otherwise
/// `~/.openfeature-mcp.json`.
pub fn config_file_path(env: &dyn EnvSource) -> Option<PathBuf> {
    if let Some(path) = non_empty(env.var(CONFIG_PATH_ENV)) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}

/// Resolve OFREP settings field by field: call argument, then environment,
/// then the config file. The file is read at most once, and only when a field
/// is still unresolved after the first two sources.
pub fn resolve_ofrep_config(
    overrides: &OfrepOverrides,
    env: &dyn EnvSource,
) -> Result<OfrepConfig, OfrepConfigError> {
    let path = config_file_path(env);
    let file_cell: OnceCell<FileSection> = OnceCell::new();
    let file = || {
        file_cell.get_or_init(|| path.as_deref().map(load_file_section).unwrap_or_default())
    };

    let base_url = non_empty(overrides.base_url.clone())
        .or_else(|| from_env(env, &BASE_URL_ENV))
        .or_else(|| non_empty(file().base_url.clone()))
        .ok_or_else(|| OfrepConfigError::MissingBaseUrl {
            config_path: path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| format!("~/{DEFAULT_CONFIG_FILE}")),
        })?;

    let bearer_token = non_empty(overrides.bearer_token.clone())
        .or_else(|| from_env(env, &BEARER_TOKEN_ENV))
        .or_else(|| non_empty(file().bearer_token.clone()));

    let api_key = non_empty(overrides.api_key.clone())
        .or_else(|| from_env(env, &API_KEY_ENV))
        .or_else(|| non_empty(file().api_key.clone()));

    Ok(OfrepConfig {
        base_url,
        bearer_token,
        api_key,
    })
}

fn from_env(env: &dyn EnvSource, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| non_empty(env.var(name)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Missing, unreadable or malformed files all mean "no file configuration".
fn load_file_section(path: &Path) -> FileSection {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no OFREP config file");
            return FileSection::default();
        }
    };

    match serde_json::from_str::<ConfigFile>(&raw) {
        Ok(parsed) => parsed.ofrep.unwrap_or_default(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unparseable OFREP config file");
            FileSection::default()
        }
    }
}
