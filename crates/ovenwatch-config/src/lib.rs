//! Configuration for the ovenwatch dashboard.
//!
//! TOML profiles layered with `OVENWATCH_*` environment variables via
//! figment, and translation to `ovenwatch_core::PollerConfig`. The binary
//! applies its own CLI flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ovenwatch_core::{DEFAULT_ENDPOINT, PollerConfig, SnapshotShape, TlsVerification};

/// Profile used when neither the CLI nor the config file names one.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named dashboards.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    /// Period between polls, e.g. "1s", "2s", "500ms".
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout: String,

    #[serde(default)]
    pub shape: SnapshotShape,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            timeout: default_timeout(),
            shape: SnapshotShape::default(),
            insecure: false,
        }
    }
}

fn default_poll_interval() -> String {
    "1s".into()
}
fn default_timeout() -> String {
    "5s".into()
}

/// A named dashboard: one stats endpoint plus optional overrides.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Full stats URL (e.g., "http://localhost:10000/api/stats").
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<SnapshotShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl Profile {
    /// Profile for the pizzeria server on this machine.
    pub fn local() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            poll_interval: None,
            timeout: None,
            shape: None,
            insecure: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "ovenwatch", "ovenwatch").map_or_else(
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
    p.push("ovenwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file yields defaults.
///
/// Environment keys nest with `__`, e.g. `OVENWATCH_DEFAULTS__POLL_INTERVAL=2s`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OVENWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// A starter config with a single profile pointing at the local server.
pub fn starter_config() -> Config {
    let mut cfg = Config::default();
    cfg.profiles.insert(DEFAULT_PROFILE.into(), Profile::local());
    cfg
}

// ── Profile resolution ──────────────────────────────────────────────

/// A fully resolved profile, ready to hand to the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub poller: PollerConfig,
}

/// Parse a human-readable duration ("1s", "250ms") for `field`.
pub fn parse_duration(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value.trim()).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{value}': {e}"),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(duration)
}

/// Parse and check a stats endpoint URL.
pub fn parse_endpoint(value: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = value.parse().map_err(|_| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {value}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Resolve `profile_name` (or the configured default) into a `PollerConfig`.
///
/// The implicit `default` profile exists even without a config file and
/// points at [`DEFAULT_ENDPOINT`]; any other missing name is an error.
pub fn resolve_profile(
    cfg: &Config,
    profile_name: Option<&str>,
) -> Result<ResolvedProfile, ConfigError> {
    let name = profile_name
        .or(cfg.default_profile.as_deref())
        .unwrap_or(DEFAULT_PROFILE);

    let fallback;
    let profile = match cfg.profiles.get(name) {
        Some(profile) => profile,
        None if name == DEFAULT_PROFILE => {
            fallback = Profile::local();
            &fallback
        }
        None => {
            return Err(ConfigError::UnknownProfile {
                profile: name.into(),
            });
        }
    };

    let d = &cfg.defaults;
    let interval = parse_duration(
        "poll_interval",
        profile.poll_interval.as_deref().unwrap_or(&d.poll_interval),
    )?;
    let timeout = parse_duration("timeout", profile.timeout.as_deref().unwrap_or(&d.timeout))?;

    let tls = if profile.insecure.unwrap_or(d.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    let mut poller = PollerConfig::new(parse_endpoint(&profile.endpoint)?)
        .with_interval(interval)
        .with_shape(profile.shape.unwrap_or(d.shape));
    poller.timeout = timeout;
    poller.tls = tls;

    Ok(ResolvedProfile {
        name: name.into(),
        poller,
    })
}

// ── Effective settings ──────────────────────────────────────────────

#[derive(Serialize)]
struct EffectiveSettings<'a> {
    profile: &'a str,
    endpoint: &'a str,
    shape: SnapshotShape,
    poll_interval: String,
    timeout: String,
    insecure: bool,
}

/// Render a resolved profile as TOML (for `config show`).
pub fn render_effective(resolved: &ResolvedProfile) -> Result<String, ConfigError> {
    let p = &resolved.poller;
    let settings = EffectiveSettings {
        profile: &resolved.name,
        endpoint: p.endpoint.as_str(),
        shape: p.shape,
        poll_interval: humantime::format_duration(p.interval).to_string(),
        timeout: humantime::format_duration(p.timeout).to_string(),
        insecure: p.tls == TlsVerification::DangerAcceptInvalid,
    };
    Ok(toml::to_string_pretty(&settings)?)
}
