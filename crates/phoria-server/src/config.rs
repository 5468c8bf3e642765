//! Runtime settings.
//!
//! Environment-variable driven, prefix `PHORIA_`. This is the ambient
//! floor the runtime needs (run mode, bind address), not a layered
//! configuration system - that collaborator lives outside this crate.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// An environment variable held a value the setting cannot parse.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Environment variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// The mode the render pipeline is running in, reported by the health
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Development,
    Production,
}

impl RuntimeMode {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(SettingsError::InvalidValue {
                key: keys::ENV.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

mod keys {
    pub const ENV: &str = "PHORIA_ENV";
    pub const HOST: &str = "PHORIA_HOST";
    pub const PORT: &str = "PHORIA_PORT";
}

/// Server runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Run mode, `PHORIA_ENV` (default `development`).
    pub mode: RuntimeMode,
    /// Bind host, `PHORIA_HOST` (default `127.0.0.1`).
    pub host: String,
    /// Bind port, `PHORIA_PORT` (default `5173`).
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::Development,
            host: "127.0.0.1".to_string(),
            port: 5173,
        }
    }
}

impl Settings {
    /// Reads settings from the environment, falling back to defaults for
    /// unset variables and failing on unparseable values.
    pub fn from_env() -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let mode = match env::var(keys::ENV) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.mode,
        };
        let host = env::var(keys::HOST).unwrap_or(defaults.host);
        let port = match env::var(keys::PORT) {
            Ok(value) => value
                .parse()
                .map_err(|_| SettingsError::InvalidValue {
                    key: keys::PORT.to_string(),
                    value,
                })?,
            Err(_) => defaults.port,
        };

        Ok(Self { mode, host, port })
    }

    /// The bind address as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("development", RuntimeMode::Development)]
    #[case("DEV", RuntimeMode::Development)]
    #[case("Production", RuntimeMode::Production)]
    #[case("prod", RuntimeMode::Production)]
    fn runtime_mode_parses_known_names(#[case] input: &str, #[case] expected: RuntimeMode) {
        assert_eq!(input.parse::<RuntimeMode>().unwrap(), expected);
    }

    #[test]
    fn runtime_mode_rejects_unknown_names() {
        assert!(matches!(
            "staging".parse::<RuntimeMode>(),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn defaults_are_development_localhost() {
        let settings = Settings::default();
        assert_eq!(settings.mode, RuntimeMode::Development);
        assert_eq!(settings.addr(), "127.0.0.1:5173");
    }

    #[test]
    fn runtime_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RuntimeMode::Production).unwrap(),
            "\"production\""
        );
    }
}
