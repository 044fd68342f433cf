//! Shared configuration for the Cygnus CLI and TUI.
//!
//! One TOML file plus `CYGNUS_`-prefixed environment overrides, translated
//! into the runtime types `cygnus-api` and `cygnus-core` consume. Both
//! binaries depend on this crate; flag overrides live in the binaries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use cygnus_api::{DeviceClient, TlsMode, TransportConfig};
use cygnus_core::DashboardConfig;
use cygnus_core::config::DEFAULT_ADMIN_SERVICE;

/// Prefix for environment overrides. Nested keys use `__`
/// (`CYGNUS_DASHBOARD__POLL_INTERVAL_SECS`).
pub const ENV_PREFIX: &str = "CYGNUS_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("could not build backend client: {0}")]
    Client(#[from] cygnus_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Discovery backend root (e.g., "http://192.168.1.20:5000").
    pub backend_url: String,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Poll loop and re-discovery pacing.
    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            defaults: Defaults::default(),
            dashboard: DashboardSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Accept self-signed certificates from an HTTPS backend.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardSection {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_grace")]
    pub rediscover_grace_ms: u64,

    #[serde(default = "default_cooldown")]
    pub rediscover_cooldown_ms: u64,

    /// Service label always rendered first.
    #[serde(default = "default_admin_service")]
    pub admin_service: String,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            rediscover_grace_ms: default_grace(),
            rediscover_cooldown_ms: default_cooldown(),
            admin_service: default_admin_service(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:5000".into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_poll_interval() -> u64 {
    10
}
fn default_grace() -> u64 {
    2000
}
fn default_cooldown() -> u64 {
    5000
}
fn default_admin_service() -> String {
    DEFAULT_ADMIN_SERVICE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "cygnus", "cygnus").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cygnus");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file yields the
/// built-in defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to runtime types ────────────────────────────────────

impl Config {
    /// Parsed backend URL.
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        self.backend_url
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "backend_url".into(),
                reason: format!("invalid URL '{}': {e}", self.backend_url),
            })
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = if self.defaults.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.defaults.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };
        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.defaults.timeout),
        }
    }

    /// Build a ready-to-use backend client.
    pub fn client(&self) -> Result<DeviceClient, ConfigError> {
        Ok(DeviceClient::new(self.backend_url()?, &self.transport())?)
    }

    /// Engine pacing, validated.
    pub fn dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let section = &self.dashboard;
        if section.poll_interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "dashboard.poll_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if section.rediscover_cooldown_ms < section.rediscover_grace_ms {
            return Err(ConfigError::Validation {
                field: "dashboard.rediscover_cooldown_ms".into(),
                reason: format!(
                    "must not be shorter than rediscover_grace_ms ({})",
                    section.rediscover_grace_ms
                ),
            });
        }
        if section.admin_service.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "dashboard.admin_service".into(),
                reason: "must not be empty".into(),
            });
        }

        Ok(DashboardConfig {
            poll_interval: Duration::from_secs(section.poll_interval_secs),
            rediscover_grace: Duration::from_millis(section.rediscover_grace_ms),
            rediscover_cooldown: Duration::from_millis(section.rediscover_cooldown_ms),
            admin_service: section.admin_service.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(
            cfg.dashboard_config().unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
backend_url = "http://10.0.0.2:5000"

[defaults]
timeout = 3

[dashboard]
poll_interval_secs = 30
admin_service = "Admin UI"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.backend_url, "http://10.0.0.2:5000");
        assert_eq!(cfg.defaults.timeout, 3);
        assert_eq!(cfg.defaults.output, "table");

        let dash = cfg.dashboard_config().unwrap();
        assert_eq!(dash.poll_interval, Duration::from_secs(30));
        assert_eq!(dash.rediscover_grace, Duration::from_secs(2));
        assert_eq!(dash.admin_service, "Admin UI");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.backend_url = "https://gateway.lan".into();
        cfg.defaults.insecure = true;
        cfg.dashboard.rediscover_cooldown_ms = 8000;
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut cfg = Config::default();
        cfg.dashboard.poll_interval_secs = 0;
        let err = cfg.dashboard_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "dashboard.poll_interval_secs"));
    }

    #[test]
    fn cooldown_shorter_than_grace_is_rejected() {
        let mut cfg = Config::default();
        cfg.dashboard.rediscover_grace_ms = 3000;
        cfg.dashboard.rediscover_cooldown_ms = 1000;
        assert!(cfg.dashboard_config().is_err());
    }

    #[test]
    fn invalid_backend_url_is_a_validation_error() {
        let cfg = Config {
            backend_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.backend_url(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn transport_follows_tls_settings() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.transport().tls, TlsMode::System));

        cfg.defaults.ca_cert = Some(PathBuf::from("/etc/cygnus/ca.pem"));
        assert!(matches!(cfg.transport().tls, TlsMode::CustomCa(_)));

        cfg.defaults.insecure = true;
        assert!(matches!(cfg.transport().tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(cfg.transport().timeout, Duration::from_secs(10));
    }
}
