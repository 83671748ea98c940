//! Connection pool provider: runs parameterized SQL against PostgreSQL and nothing else.

pub mod params;
pub use params::SqlParam;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::FromRow;

#[derive(Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Open the pool and verify one round-trip so bad credentials fail at startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        let db = Db { pool };
        db.ping().await?;
        tracing::info!(
            host = %config.host_for_logs(),
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(db)
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn fetch_all<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p);
        }
        query.fetch_all(&self.pool).await
    }

    pub async fn fetch_optional<T>(&self, sql: &str, params: Vec<SqlParam>) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p);
        }
        query.fetch_optional(&self.pool).await
    }

    /// Run a write statement and return the number of rows it touched.
    pub async fn execute(&self, sql: &str, params: Vec<SqlParam>) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(p);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
