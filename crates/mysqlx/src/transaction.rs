//! Transactions and the [`crate::transaction!`] macro.
//!
//! A [`Transaction`] implements [`GenericClient`], so every [`crate::Crud`]
//! helper runs inside it unchanged:
//!
//! ```ignore
//! use mysqlx::{Crud, DbResult, StepOptions, fields};
//!
//! # async fn demo(db: &mysqlx::Database) -> DbResult<()> {
//! mysqlx::transaction!(db, tx, {
//!     tx.minus("accounts", "balance", StepOptions::new().step(100).wheres(fields! { "id" => 1 })).await?;
//!     tx.add("accounts", "balance", StepOptions::new().step(100).wheres(fields! { "id" => 2 })).await?;
//!     Ok(())
//! })?;
//! # Ok(()) }
//! ```

use crate::client::{ExecResult, GenericClient, bind_all, log_statement};
use crate::config::DatabaseConfig;
use crate::error::DbResult;
use crate::row::{Row, decode_rows};
use crate::value::Value;
use sqlx::MySql;
use tokio::sync::Mutex;

/// Runs the given block inside a transaction begun on a [`crate::Database`].
///
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`.
///
/// The block must evaluate to `mysqlx::DbResult<T>`.
#[macro_export]
macro_rules! transaction {
    ($db:expr, $tx:ident, $body:block) => {{
        let $tx = ($db).begin().await?;

        let __mysqlx_tx_body_result = async { $body }.await;
        match __mysqlx_tx_body_result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(error) => match $tx.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::DbError::Other(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
}

/// An open transaction.
///
/// Statements are serialised through an internal lock, since the driver
/// needs exclusive access to the connection. Dropping the handle without
/// calling [`Transaction::commit`] rolls the transaction back.
pub struct Transaction {
    inner: Mutex<sqlx::Transaction<'static, MySql>>,
    prefix: String,
    string_sentinels: bool,
}

impl Transaction {
    pub(crate) fn new(tx: sqlx::Transaction<'static, MySql>, config: &DatabaseConfig) -> Self {
        Self {
            inner: Mutex::new(tx),
            prefix: config.prefix.clone(),
            string_sentinels: config.string_sentinels,
        }
    }

    pub async fn commit(self) -> DbResult<()> {
        self.inner.into_inner().commit().await?;
        tracing::debug!(target: "mysqlx.sql", "transaction committed");
        Ok(())
    }

    pub async fn rollback(self) -> DbResult<()> {
        self.inner.into_inner().rollback().await?;
        tracing::debug!(target: "mysqlx.sql", "transaction rolled back");
        Ok(())
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("prefix", &self.prefix)
            .field("string_sentinels", &self.string_sentinels)
            .finish_non_exhaustive()
    }
}

impl GenericClient for Transaction {
    async fn execute(&self, sql: &str, params: &[Value]) -> DbResult<ExecResult> {
        log_statement("execute", sql, params);
        let mut tx = self.inner.lock().await;
        let result = bind_all(sql, params).execute(&mut **tx).await?;
        Ok(result.into())
    }

    async fn query(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Row>> {
        log_statement("query", sql, params);
        let mut tx = self.inner.lock().await;
        let rows = bind_all(sql, params).fetch_all(&mut **tx).await?;
        decode_rows(&rows)
    }

    async fn query_row(&self, sql: &str, params: &[Value]) -> DbResult<Option<Row>> {
        log_statement("query_row", sql, params);
        let mut tx = self.inner.lock().await;
        let row = bind_all(sql, params).fetch_optional(&mut **tx).await?;
        Ok(decode_rows(row.as_slice())?.into_iter().next())
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    fn string_sentinels(&self) -> bool {
        self.string_sentinels
    }
}
