//! Process configuration, read from `GRAINDASH_*` environment variables.

use std::net::SocketAddr;

use thiserror::Error;

use graindash_observability::LogFormat;
use graindash_reporting::DEFAULT_REPORT_TITLE;

pub const ENV_BIND: &str = "GRAINDASH_BIND";
pub const ENV_SEED_DEMO: &str = "GRAINDASH_SEED_DEMO";
pub const ENV_LOG_FORMAT: &str = "GRAINDASH_LOG_FORMAT";
pub const ENV_REPORT_TITLE: &str = "GRAINDASH_REPORT_TITLE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Insert the five demo operations at startup.
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
    pub report_title: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_demo_data: false,
            log_format: LogFormat::Json,
            report_title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_BIND) {
            cfg.bind_addr = raw.trim().parse().map_err(|e: std::net::AddrParseError| {
                invalid(ENV_BIND, &raw, e.to_string())
            })?;
        }
        if let Some(raw) = lookup(ENV_SEED_DEMO) {
            cfg.seed_demo_data = parse_bool(&raw).ok_or_else(|| {
                invalid(ENV_SEED_DEMO, &raw, "expected true/false, 1/0, yes/no or on/off")
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            cfg.log_format = raw
                .parse()
                .map_err(|e: graindash_observability::UnknownLogFormat| {
                    invalid(ENV_LOG_FORMAT, &raw, e.to_string())
                })?;
        }
        if let Some(raw) = lookup(ENV_REPORT_TITLE) {
            let title = raw.trim();
            if title.is_empty() {
                return Err(invalid(ENV_REPORT_TITLE, &raw, "title cannot be blank"));
            }
            cfg.report_title = title.to_string();
        }

        Ok(cfg)
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
