//! Pooled database handle.

use crate::client::{ExecResult, GenericClient, bind_all, log_statement};
use crate::config::DatabaseConfig;
use crate::dsn::{connect_options, redact};
use crate::error::{DbError, DbResult};
use crate::row::{Row, decode_rows};
use crate::transaction::Transaction;
use crate::value::Value;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

/// A connection pool plus the settings used to generate SQL against it.
///
/// Cloning is cheap; clones share the pool.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use mysqlx::{Crud, Database, DatabaseConfig, fields};
///
/// let config = DatabaseConfig::new(Duration::from_secs(100)).prefix("app");
/// let db = Database::connect("app:secret@tcp(127.0.0.1:3306)/shop", config).await?;
/// let id = db.insert("users", &fields! { "name" => "alice" }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl Database {
    /// Build the pool and verify connectivity with `SELECT 1`.
    ///
    /// Failures are logged at `error` and returned as [`DbError::Connection`];
    /// whether that is fatal is up to the caller.
    pub async fn connect(dsn: &str, config: DatabaseConfig) -> DbResult<Self> {
        let options = connect_options(dsn)?;
        let pool = pool_options(&config)
            .connect_with(options)
            .await
            .map_err(|e| connection_error(dsn, e))?;

        let db = Self { pool, config };
        db.ping().await.map_err(|e| connection_error(dsn, e))?;

        tracing::info!(
            target: "mysqlx.sql",
            dsn = %redact(dsn),
            pool_size = db.config.pool_size(),
            "database connected"
        );
        Ok(db)
    }

    /// Build the pool without opening any connection yet.
    pub fn connect_lazy(dsn: &str, config: DatabaseConfig) -> DbResult<Self> {
        let options = connect_options(dsn)?;
        Ok(Self::connect_lazy_with(options, config))
    }

    /// Like [`Database::connect_lazy`] with pre-built connect options.
    pub fn connect_lazy_with(options: MySqlConnectOptions, config: DatabaseConfig) -> Self {
        let pool = pool_options(&config).connect_lazy_with(options);
        Self { pool, config }
    }

    /// Wrap an existing pool. Pool sizing in `config` is not applied.
    pub fn from_pool(pool: MySqlPool, config: DatabaseConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Begin a transaction on a pooled connection.
    pub async fn begin(&self) -> DbResult<Transaction> {
        let tx = self.pool.begin().await?;
        tracing::debug!(target: "mysqlx.sql", "transaction started");
        Ok(Transaction::new(tx, &self.config))
    }

    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every connection and stop handing out new ones.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!(target: "mysqlx.sql", "database closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(config.pool_size())
        .min_connections(0)
        .max_lifetime(config.effective_max_lifetime())
        .acquire_timeout(config.acquire_timeout)
}

fn connection_error(dsn: &str, err: impl std::fmt::Display) -> DbError {
    tracing::error!(target: "mysqlx.sql", dsn = %redact(dsn), error = %err, "database connection failed");
    DbError::Connection(err.to_string())
}

impl GenericClient for Database {
    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<ExecResult> {
        log_statement("execute", sql, params);
        let result = bind_all(sql, params).execute(&self.pool).await?;
        Ok(result.into())
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Row>> {
        log_statement("query", sql, params);
        let rows = bind_all(sql, params).fetch_all(&self.pool).await?;
        decode_rows(&rows)
    }

    async fn query_row(&self, sql: &str, params: &[Value]) -> DbResult<Option<Row>> {
        log_statement("query_row", sql, params);
        let row = bind_all(sql, params).fetch_optional(&self.pool).await?;
        Ok(decode_rows(row.as_slice())?.into_iter().next())
    }

    fn table_prefix(&self) -> &str {
        &self.config.prefix
    }

    fn string_sentinels(&self) -> bool {
        self.config.string_sentinels
    }
}
