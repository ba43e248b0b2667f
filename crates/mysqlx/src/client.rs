//! Generic client trait for unified database access.

use crate::error::DbResult;
use crate::row::Row;
use crate::value::Value;
use sqlx::MySql;
use sqlx::mysql::{MySqlArguments, MySqlQueryResult};
use sqlx::query::Query;

/// Outcome of a data-modifying statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// `LAST_INSERT_ID()` for the statement; 0 when it generated none.
    pub last_insert_id: u64,
}

impl From<MySqlQueryResult> for ExecResult {
    fn from(result: MySqlQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        }
    }
}

/// A trait that unifies pooled connections and transactions.
///
/// The CRUD helpers in [`crate::Crud`] are implemented for every
/// `GenericClient`, so the same repository code runs against a
/// [`crate::Database`] or a [`crate::Transaction`] without knowing which one
/// it got.
pub trait GenericClient: Send + Sync {
    /// Execute a statement and return the affected-row count and insert id.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<ExecResult>> + Send;

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<Vec<Row>>> + Send;

    /// Execute a query and return the first row, if any.
    ///
    /// The default implementation calls [`GenericClient::query`] and keeps
    /// the first row.
    fn query_row(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<Option<Row>>> + Send {
        async move { Ok(self.query(sql, params).await?.into_iter().next()) }
    }

    /// Prefix joined to logical table names as `<prefix>_<name>`.
    fn table_prefix(&self) -> &str {
        ""
    }

    /// Whether `"null"` / `"now()"` strings in SET maps are treated as SQL keywords.
    fn string_sentinels(&self) -> bool {
        true
    }
}

impl<C: GenericClient> GenericClient for &C {
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<ExecResult>> + Send {
        (*self).execute(sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<Vec<Row>>> + Send {
        (*self).query(sql, params)
    }

    fn query_row(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl std::future::Future<Output = DbResult<Option<Row>>> + Send {
        (*self).query_row(sql, params)
    }

    fn table_prefix(&self) -> &str {
        (*self).table_prefix()
    }

    fn string_sentinels(&self) -> bool {
        (*self).string_sentinels()
    }
}

/// Maximum SQL length (in bytes) emitted in statement logs.
const MAX_LOGGED_SQL: usize = 200;

fn truncate_sql(sql: &str) -> std::borrow::Cow<'_, str> {
    if sql.len() <= MAX_LOGGED_SQL {
        return sql.into();
    }
    let mut end = MAX_LOGGED_SQL;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end]).into()
}

/// Emit the statement about to run on the `mysqlx.sql` target.
pub(crate) fn log_statement(kind: &'static str, sql: &str, params: &[Value]) {
    tracing::debug!(
        target: "mysqlx.sql",
        kind,
        sql = %truncate_sql(sql),
        params = params.len(),
        "executing statement"
    );
}

/// Build a sqlx query with every parameter bound in order.
pub(crate) fn bind_all<'q>(sql: &'q str, params: &[Value]) -> Query<'q, MySql, MySqlArguments> {
    params
        .iter()
        .cloned()
        .fold(sqlx::query(sql), |q, value| match value {
            Value::Null => q.bind(None::<String>),
            // Fragments render `Now` as SQL text; a bound `Now` can only come
            // from a hand-written parameter list, so send the client clock.
            Value::Now => q.bind(chrono::Utc::now().naive_utc()),
            Value::Bool(v) => q.bind(v),
            Value::Int(v) => q.bind(v),
            Value::UInt(v) => q.bind(v),
            Value::Float(v) => q.bind(v),
            Value::Decimal(v) => q.bind(v),
            Value::Text(v) => q.bind(v),
            Value::Bytes(v) => q.bind(v),
            Value::Date(v) => q.bind(v),
            Value::Time(v) => q.bind(v),
            Value::DateTime(v) => q.bind(v),
            Value::Json(v) => q.bind(v),
        })
}
