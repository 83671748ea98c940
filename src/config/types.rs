//! Runtime configuration types, populated from the environment.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Where the connection parameters come from: a single URL or discrete `PG*` variables.
#[derive(Clone, PartialEq)]
pub enum DatabaseSource {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub source: DatabaseSource,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.source {
            DatabaseSource::Url(url) => PgConnectOptions::from_str(url)?,
            DatabaseSource::Parts {
                host,
                port,
                user,
                password,
                database,
            } => {
                let mut o = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .database(database);
                if let Some(pw) = password {
                    o = o.password(pw);
                }
                o
            }
        };
        Ok(options.ssl_mode(self.ssl_mode))
    }

    /// Host (and port) only; safe to log.
    pub fn host_for_logs(&self) -> String {
        match &self.source {
            DatabaseSource::Url(_) => self
                .connect_options()
                .map(|o| format!("{}:{}", o.get_host(), o.get_port()))
                .unwrap_or_else(|_| "<invalid url>".into()),
            DatabaseSource::Parts { host, port, .. } => format!("{}:{}", host, port),
        }
    }
}

/// Replace the password component of a connection URL with `***`.
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => format!(
            "{}{}:***{}",
            &url[..scheme_end + 3],
            &userinfo[..colon],
            &rest[at..]
        ),
        None => url.to_string(),
    }
}

impl fmt::Debug for DatabaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseSource::Url(url) => f.debug_tuple("Url").field(&redact_url(url)).finish(),
            DatabaseSource::Parts {
                host,
                port,
                user,
                password,
                database,
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &password.as_ref().map(|_| "***"))
                .field("database", database)
                .finish(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("source", &self.source)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
