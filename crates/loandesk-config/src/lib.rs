//! Configuration for loandesk front ends.
//!
//! A TOML file plus `LOANDESK_*` environment variables, merged with
//! figment, and resolution of the API base URL into a
//! `loandesk_core::ClientConfig`. The base URL is resolved once at
//! startup; nothing here is consulted per request.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use loandesk_core::ClientConfig;

/// API used when running against a local backend.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:5000/api";

/// Hosted API used when nothing else is configured.
pub const PRODUCTION_API_URL: &str = "https://alfa-crm.replit.app/api";

const ENV_PREFIX: &str = "LOANDESK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

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

/// Deployment the front end talks to when no URL is given explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn default_api_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::Validation {
                field: "environment".into(),
                reason: format!("expected 'development' or 'production', got '{other}'"),
            }),
        }
    }
}

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,

    /// Explicit API base URL; wins over the environment default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "loandesk", "loandesk").map_or_else(
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
    p.push("loandesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

/// Load the config from file + environment (`LOANDESK_API_URL`,
/// `LOANDESK_ENVIRONMENT`). A missing file yields defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = file_figment(&config_path()).merge(Env::prefixed(ENV_PREFIX));
    Ok(figment.extract()?)
}

/// Load only the given file, ignoring the environment.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    Ok(file_figment(path).extract()?)
}

/// Load config, returning a default if it cannot be read.
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

// ── Base URL resolution ─────────────────────────────────────────────

fn parse_api_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pick the API base URL: explicit override, then the configured
/// `api_url`, then the environment's default.
pub fn resolve_base_url(override_url: Option<&str>, cfg: &Config) -> Result<Url, ConfigError> {
    if let Some(raw) = non_blank(override_url) {
        return parse_api_url("api_url", raw);
    }
    if let Some(raw) = non_blank(cfg.api_url.as_deref()) {
        return parse_api_url("api_url", raw);
    }
    parse_api_url("environment", cfg.environment.default_api_url())
}

/// Build the coordinator's `ClientConfig`.
pub fn to_client_config(
    cfg: &Config,
    override_url: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    Ok(ClientConfig::new(resolve_base_url(override_url, cfg)?))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_to_production() {
        let cfg = Config::default();
        assert_eq!(
            resolve_base_url(None, &cfg).expect("url").as_str(),
            "https://alfa-crm.replit.app/api"
        );
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn development_uses_localhost() {
        let cfg = Config {
            environment: Environment::Development,
            ..Config::default()
        };
        assert_eq!(
            resolve_base_url(None, &cfg).expect("url").as_str(),
            "http://localhost:5000/api"
        );
    }

    #[test]
    fn explicit_urls_win_in_order() {
        let cfg = Config {
            environment: Environment::Development,
            api_url: Some("https://staging.example.com/api".into()),
            ..Config::default()
        };
        assert_eq!(
            resolve_base_url(None, &cfg).expect("url").as_str(),
            "https://staging.example.com/api"
        );
        assert_eq!(
            resolve_base_url(Some("http://10.0.0.5:5000/api"), &cfg)
                .expect("url")
                .as_str(),
            "http://10.0.0.5:5000/api"
        );
        assert_eq!(
            resolve_base_url(Some("  "), &cfg).expect("url").as_str(),
            "https://staging.example.com/api"
        );
    }

    #[test]
    fn invalid_urls_are_rejected() {
        let cfg = Config::default();
        let err = resolve_base_url(Some("not a url"), &cfg).expect_err("bad url");
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));

        let err = resolve_base_url(Some("ftp://files.example.com"), &cfg).expect_err("scheme");
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn environment_parsing() {
        assert_eq!("DEV".parse::<Environment>().expect("dev"), Environment::Development);
        assert_eq!(
            "production".parse::<Environment>().expect("prod"),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn load_from_file_and_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let missing = load_config_file(&path).expect("defaults for missing file");
        assert_eq!(missing, Config::default());

        let cfg = Config {
            environment: Environment::Development,
            api_url: Some("http://127.0.0.1:5000/api".into()),
            defaults: Defaults {
                output: "json".into(),
                color: "never".into(),
            },
        };
        save_config_to(&cfg, &path).expect("save");
        let loaded = load_config_file(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "environment = \"development\"\n").expect("write");

        let cfg = load_config_file(&path).expect("load");
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.api_url, None);
        assert_eq!(cfg.defaults.color, "auto");

        let client = to_client_config(&cfg, None).expect("client config");
        assert_eq!(client.base_url.as_str(), "http://localhost:5000/api");
        assert_eq!(client.timeout, None);
    }
}
