//! CLI-owned configuration: TOML profiles and endpoint resolution.
//!
//! Core never sees these types -- it receives a ready `TelemetryClient`
//! built from the resolved endpoint settings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use gatewatch_api::TransportConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

/// CLI-owned TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named endpoint profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// One named telemetry endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Endpoint base URL (e.g., "https://telemetry.internal").
    pub endpoint: String,

    /// Region label stamped on analysis reports.
    pub region: Option<String>,

    /// Bearer token (plaintext -- prefer token_env).
    pub token: Option<String>,

    /// Environment variable name containing the bearer token.
    pub token_env: Option<String>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "gatewatch", "gatewatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("gatewatch");
            p.push("config.toml");
            p
        })
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("GATEWATCH_CONFIG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Endpoint resolution ──────────────────────────────────────────────

/// Everything needed to build a `TelemetryClient` plus the scope label.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: Url,
    pub region: String,
    pub transport: TransportConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `EndpointConfig` from the config file, profile, and CLI
/// overrides. Flag > env > profile, as everywhere.
pub fn resolve_endpoint(global: &GlobalOpts) -> Result<EndpointConfig, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profiles.get(&profile_name);

    // A profile named on the command line must exist.
    if global.profile.is_some() && profile.is_none() {
        let mut available: Vec<_> = config.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    let url_str = global
        .endpoint
        .as_deref()
        .or(profile.map(|p| p.endpoint.as_str()))
        .ok_or_else(|| CliError::NoEndpoint {
            path: config_path().display().to_string(),
        })?;

    let base_url: Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let region = global
        .region
        .clone()
        .or_else(|| profile.and_then(|p| p.region.clone()))
        .unwrap_or_else(|| "unknown".into());

    let bearer_token = resolve_token(global, profile);

    let insecure = global.insecure
        || profile.and_then(|p| p.insecure).unwrap_or(config.defaults.insecure);

    let timeout = profile
        .and_then(|p| p.timeout)
        .unwrap_or(global.timeout);

    Ok(EndpointConfig {
        base_url,
        region,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
            danger_accept_invalid_certs: insecure,
            bearer_token,
        },
    })
}

/// Resolve the bearer token from the credential chain.
fn resolve_token(global: &GlobalOpts, profile: Option<&Profile>) -> Option<String> {
    // 1. CLI flag / env var
    if let Some(ref token) = global.token {
        return Some(token.clone());
    }

    let profile = profile?;

    // 2. Profile's token_env -> env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(val);
        }
    }

    // 3. Plaintext in config
    profile.token.clone()
}
