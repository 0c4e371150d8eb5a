use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GATEWAY_URL, DEFAULT_REFRESH_MINUTES, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS,
    MIN_TIMEOUT_SECONDS,
};

pub const USER_DATA_DIR_ENV: &str = "PENELOPE_USER_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    pub url: String,
    /// Opaque bearer token, sent as-is.
    #[serde(default)]
    pub auth_token: String,
    /// Total request budget; clamped to 10..=15 seconds when used.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_minutes")]
    pub interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_refresh_minutes() -> u64 {
    DEFAULT_REFRESH_MINUTES
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_REFRESH_MINUTES,
        }
    }
}

impl GatewayConfig {
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_seconds
                .clamp(MIN_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS),
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.auth_token.trim().is_empty()
    }

    pub fn token_preview(&self) -> String {
        mask_token_preview(&self.auth_token)
    }
}

// Keep the token out of logs and panic messages.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("auth_token", &self.token_preview())
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.max(1) * 60)
    }
}

impl AppConfig {
    pub fn default_config() -> Self {
        Self {
            gateway: GatewayConfig::new(DEFAULT_GATEWAY_URL, ""),
            refresh: RefreshConfig::default(),
        }
    }
}

pub fn mask_token_preview(token: &str) -> String {
    let t = token.trim();
    if t.is_empty() {
        return "not set".to_string();
    }
    let chars: Vec<char> = t.chars().collect();
    if chars.len() < 10 {
        return "set".to_string();
    }
    let start_len = std::cmp::min(6, chars.len().saturating_sub(4));
    let start: String = chars.iter().take(start_len).collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    format!("{start}******{end}")
}

/// `$PENELOPE_USER_DATA_DIR` if it is a directory, else `./user-data` if present, else `.`.
pub fn user_data_dir() -> PathBuf {
    if let Ok(p) = std::env::var(USER_DATA_DIR_ENV) {
        let pb = PathBuf::from(p);
        if pb.is_dir() {
            return pb;
        }
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let p = cwd.join("user-data");
    if p.is_dir() {
        return p;
    }
    cwd
}

pub fn default_config_path() -> PathBuf {
    user_data_dir().join(CONFIG_FILE_NAME)
}

/// Reads `path`, or writes the default config there first if it does not exist yet.
pub fn load_or_init_config(path: &Path) -> anyhow::Result<AppConfig> {
    if path.exists() {
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&txt)
            .with_context(|| format!("parse config: {}", path.display()))?;
        return Ok(cfg);
    }
    let cfg = AppConfig::default_config();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config dir: {}", parent.display()))?;
    }
    std::fs::write(path, toml::to_string_pretty(&cfg)?)
        .with_context(|| format!("write config: {}", path.display()))?;
    log::info!("wrote default config to {}", path.display());
    Ok(cfg)
}
