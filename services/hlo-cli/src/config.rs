//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! Tokens are never read from the TOML. They come from `HLO_USER_TOKEN` /
//! `HLO_ACCESS_TOKEN`, the command line or the token files.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool name this CLI registers with the service
pub const TOOL_NAME: &str = "HeroLab Online CLI";

/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "hlo-cli.toml";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// From `HLO_USER_TOKEN`
    #[serde(skip)]
    pub user_token: Option<Secret<String>>,
    /// From `HLO_ACCESS_TOKEN`
    #[serde(skip)]
    pub access_token: Option<Secret<String>>,
}

/// API client settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    #[serde(default = "default_auto_token_handling")]
    pub auto_token_handling: bool,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tool_name: default_tool_name(),
            auto_token_handling: default_auto_token_handling(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Token file location
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Defaults to `~/.hlo-api`
    #[serde(default)]
    pub token_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    hlo_api::API_BASE_URL.to_string()
}

fn default_tool_name() -> String {
    TOOL_NAME.to_string()
}

fn default_auto_token_handling() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// A missing file is an error only when `required` is set, i.e. the path
    /// was named explicitly.
    pub fn load(path: &Path, required: bool) -> common::Result<Self> {
        let mut config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e.into()),
        };

        if !config.api.base_url.starts_with("http://")
            && !config.api.base_url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                config.api.base_url
            )));
        }

        if config.api.tool_name.trim().is_empty() {
            return Err(common::Error::Config("tool_name must not be empty".into()));
        }

        if config.api.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        config.user_token = env_token("HLO_USER_TOKEN");
        config.access_token = env_token("HLO_ACCESS_TOKEN");

        Ok(config)
    }

    /// Resolve config file path from CLI arg or HLO_CONFIG env var.
    ///
    /// The flag says whether the path was named explicitly.
    pub fn resolve_path(cli_path: Option<&str>) -> (PathBuf, bool) {
        if let Some(p) = cli_path {
            return (PathBuf::from(p), true);
        }
        if let Ok(p) = std::env::var("HLO_CONFIG") {
            return (PathBuf::from(p), true);
        }
        (PathBuf::from(DEFAULT_CONFIG_FILE), false)
    }
}

fn env_token(key: &str) -> Option<Secret<String>> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(Secret::new)
}
