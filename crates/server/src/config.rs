// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server configuration.
//!
//! Both values are required at process start. A missing value is fatal
//! before the server binds; the process never serves without them.

use std::env;

/// The environment variable naming the SQLite database file.
pub const DATABASE_URL_VAR: &str = "HRMS_DATABASE_URL";

/// The environment variable holding the public API key every request
/// must present.
pub const API_KEY_VAR: &str = "HRMS_API_KEY";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    /// The public API key required on every request.
    pub api_key: String,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    MissingVariable {
        /// The variable name.
        name: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVariable { name } => {
                write!(f, "Required environment variable {name} is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Arguments
    ///
    /// * `database_override` - CLI override for the database path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVariable` if a required variable is
    /// absent or empty.
    pub fn from_env(database_override: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(database_override, |name| env::var(name).ok())
    }

    fn from_lookup(
        database_override: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_url: String = match database_override {
            Some(path) => path,
            None => require(&lookup, DATABASE_URL_VAR)?,
        };
        let api_key: String = require(&lookup, API_KEY_VAR)?;

        Ok(Self {
            database_url,
            api_key,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_loads_both_values() {
        let config = ServerConfig::from_lookup(
            None,
            env_with(&[
                (DATABASE_URL_VAR, "/tmp/hrms.db"),
                (API_KEY_VAR, "public-key"),
            ]),
        )
        .expect("Config should load");
        assert_eq!(config.database_url, "/tmp/hrms.db");
        assert_eq!(config.api_key, "public-key");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result =
            ServerConfig::from_lookup(None, env_with(&[(DATABASE_URL_VAR, "/tmp/hrms.db")]));
        assert_eq!(
            result,
            Err(ConfigError::MissingVariable { name: API_KEY_VAR })
        );
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let result = ServerConfig::from_lookup(None, env_with(&[(API_KEY_VAR, "public-key")]));
        assert_eq!(
            result,
            Err(ConfigError::MissingVariable {
                name: DATABASE_URL_VAR
            })
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let result = ServerConfig::from_lookup(
            None,
            env_with(&[(DATABASE_URL_VAR, "/tmp/hrms.db"), (API_KEY_VAR, "  ")]),
        );
        assert_eq!(
            result,
            Err(ConfigError::MissingVariable { name: API_KEY_VAR })
        );
    }

    #[test]
    fn test_cli_override_replaces_database_url() {
        let config = ServerConfig::from_lookup(
            Some(String::from("/tmp/other.db")),
            env_with(&[(API_KEY_VAR, "public-key")]),
        )
        .expect("Config should load");
        assert_eq!(config.database_url, "/tmp/other.db");
    }
}
