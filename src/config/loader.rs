//! Load configuration from environment variables (or any key lookup, for tests).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use sqlx::postgres::PgSslMode;
use std::str::FromStr;

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate config from a key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server = ServerConfig {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?,
        };

        let source = match get("DATABASE_URL") {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Parts {
                host: get("PGHOST").ok_or(ConfigError::Missing("DATABASE_URL or PGHOST"))?,
                port: parse_or("PGPORT", get("PGPORT"), DEFAULT_PG_PORT)?,
                user: get("PGUSER").ok_or(ConfigError::Missing("PGUSER"))?,
                password: get("PGPASSWORD"),
                database: get("PGDATABASE").ok_or(ConfigError::Missing("PGDATABASE"))?,
            },
        };

        let ssl_mode = match get("DATABASE_SSL_MODE") {
            Some(s) => PgSslMode::from_str(&s).map_err(|_| ConfigError::Invalid {
                key: "DATABASE_SSL_MODE",
                reason: format!(
                    "'{}' (expected disable, allow, prefer, require, verify-ca or verify-full)",
                    s
                ),
            })?,
            None => PgSslMode::Prefer,
        };

        let database = DatabaseConfig {
            source,
            ssl_mode,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
        };

        let config = AppConfig { server, database };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| ConfigError::Invalid {
            key,
            reason: format!("'{}' is not a valid number", s),
        }),
    }
}
