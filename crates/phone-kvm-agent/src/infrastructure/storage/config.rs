//! TOML configuration for the `phone-kvm` agent.
//!
//! Every field has a default, so a missing file, a missing section or a
//! missing key all fall back to working values:
//!
//! ```toml
//! [bridge]
//! base_url = "https://10.0.0.7"
//! username = "admin"
//! password = "admin"
//! verify_tls = false
//! timeout_secs = 10.0
//!
//! [relay]
//! url = "http://127.0.0.1:6666"
//!
//! [pacing]
//! after_gesture_ms = 1000
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Command-line flags and `PIKVM_*` environment variables are applied on top
//! of the loaded file by the binary.

use std::path::{Path, PathBuf};

use phone_kvm_core::{PacingConfig, ScreenshotConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error other than "not found".
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but cannot be used.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub relay: RelayClientConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub screenshot: ScreenshotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the KVM bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    /// Scheme and host of the bridge, e.g. `https://10.0.0.7`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_credential")]
    pub username: String,
    #[serde(default = "default_credential")]
    pub password: String,
    /// `false` accepts self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

/// Where the clipboard relay listens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayClientConfig {
    #[serde(default = "default_relay_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level or filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://your_host_ip".to_string()
}
fn default_credential() -> String {
    "admin".to_string()
}
fn default_timeout_secs() -> f64 {
    10.0
}
fn default_relay_url() -> String {
    "http://127.0.0.1:6666".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: default_credential(),
            password: default_credential(),
            verify_tls: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RelayClientConfig {
    fn default() -> Self {
        Self {
            url: default_relay_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AgentConfig {
    /// Checks values that parse but would fail later at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [("bridge.base_url", &self.bridge.base_url), ("relay.url", &self.relay.url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must start with http:// or https://, got {url:?}"
                )));
            }
        }
        let timeout = self.bridge.timeout_secs;
        if !timeout.is_finite() || timeout <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bridge.timeout_secs must be a positive number, got {timeout}"
            )));
        }
        if self.pacing.swipe_rate_hz == 0 {
            return Err(ConfigError::Invalid("pacing.swipe_rate_hz must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed.
pub fn parse_config(content: &str) -> Result<AgentConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads `AgentConfig` from `path`, returning `AgentConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AgentConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
