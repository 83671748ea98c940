//! Academic records: REST backend for students, courses and enrollments on PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use db::Db;
pub use error::{AppError, ConfigError, StoreError};
pub use routes::{app, common_routes, records_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
