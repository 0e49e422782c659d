//! # Runtime Configuration
//!
//! Everything the binary needs, read from the process environment.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `WECOM_TOKEN` | required |
//! | `WECOM_AES_KEY` | required (43 chars) |
//! | `WECOM_CORP_ID` | required |
//! | `PORT` | `3000` |
//! | `JARVIS_HOST` | `0.0.0.0` |
//! | `JARVIS_CALLBACK_PATH` | `/wecom/callback` |
//! | `JARVIS_MAX_BODY_BYTES` | `1048576` |
//! | `JARVIS_REQUEST_TIMEOUT_SECS` | `5` |
//! | `JARVIS_LOG_LEVEL`, then `RUST_LOG` | `info` |
//! | `JARVIS_JSON_LOGS` | `false` |

use jv_02_callback_gateway::{CallbackSecrets, GatewayConfig};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (`info`, `jarvis=debug,tower_http=warn`, ...)
    pub level: String,
    /// Emit JSON lines instead of the human formatter
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct JarvisConfig {
    /// HTTP, route, limit and timeout settings.
    pub gateway: GatewayConfig,
    /// Values shared with the platform.
    pub secrets: CallbackSecrets,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Environment errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// A required variable is unset or blank
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but does not parse
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl JarvisConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(EnvError::Missing(name));

        let secrets = CallbackSecrets::new(
            require("WECOM_TOKEN")?,
            require("WECOM_AES_KEY")?,
            require("WECOM_CORP_ID")?,
        );

        let mut gateway = GatewayConfig::default();
        if let Some(port) = parse_var(&get, "PORT")? {
            gateway.http.port = port;
        }
        if let Some(host) = parse_var(&get, "JARVIS_HOST")? {
            gateway.http.host = host;
        }
        if let Some(path) = get("JARVIS_CALLBACK_PATH") {
            gateway.callback.path = path;
        }
        if let Some(limit) = parse_var(&get, "JARVIS_MAX_BODY_BYTES")? {
            gateway.limits.max_body_size = limit;
        }
        if let Some(secs) = parse_var::<u64, _>(&get, "JARVIS_REQUEST_TIMEOUT_SECS")? {
            gateway.timeouts.request = Duration::from_secs(secs);
        }

        let mut logging = LoggingConfig::default();
        if let Some(level) = get("JARVIS_LOG_LEVEL").or_else(|| get("RUST_LOG")) {
            logging.level = level;
        }
        if let Some(json) = get("JARVIS_JSON_LOGS") {
            logging.json = parse_flag(&json).ok_or(EnvError::Invalid {
                var: "JARVIS_JSON_LOGS",
                value: json,
            })?;
        }

        Ok(Self {
            gateway,
            secrets,
            logging,
        })
    }
}

fn parse_var<T, G>(get: &G, var: &'static str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| EnvError::Invalid { var, value }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Corp id as printed in the startup banner.
pub fn mask_corp_id(corp_id: &str) -> String {
    let visible: String = corp_id.chars().take(6).collect();
    format!("{}***", visible)
}
