//! Startup validation of loaded configuration.

use crate::config::{AppConfig, DatabaseSource};
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            key: "PORT",
            reason: "must be between 1 and 65535".into(),
        });
    }
    if config.server.body_limit_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "BODY_LIMIT_BYTES",
            reason: "must be greater than zero".into(),
        });
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DATABASE_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    match &config.database.source {
        DatabaseSource::Url(url) => {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::Invalid {
                    key: "DATABASE_URL",
                    reason: "must start with postgres:// or postgresql://".into(),
                });
            }
            config.database.connect_options().map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                reason: e.to_string(),
            })?;
        }
        DatabaseSource::Parts { port, .. } => {
            if *port == 0 {
                return Err(ConfigError::Invalid {
                    key: "PGPORT",
                    reason: "must be between 1 and 65535".into(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, ServerConfig};
    use sqlx::postgres::PgSslMode;

    fn config(url: &str, max_connections: u32) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                bind_addr: "127.0.0.1".into(),
                port: 3000,
                body_limit_bytes: 1024,
            },
            database: DatabaseConfig {
                source: DatabaseSource::Url(url.into()),
                ssl_mode: PgSslMode::Disable,
                max_connections,
            },
        }
    }

    #[test]
    fn accepts_postgres_urls() {
        assert!(validate(&config("postgres://localhost/escuela", 5)).is_ok());
        assert!(validate(&config("postgresql://localhost/escuela", 1)).is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate(&config("mysql://localhost/escuela", 5)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_URL", .. }));
    }

    #[test]
    fn rejects_empty_pool() {
        let err = validate(&config("postgres://localhost/escuela", 0)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. }));
    }
}
