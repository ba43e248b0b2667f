//! CRUD helpers over any [`GenericClient`].
//!
//! Every statement is built from [`FieldMap`]s through the fragment builders
//! and executed as a single prepared statement. Table names pass through
//! [`Crud::table_name`] and are backtick-quoted.

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::field_map::FieldMap;
use crate::fragment::{quote_ident, set_fragment, where_fragment};
use crate::row::{FromRow, Row};
use crate::value::Value;
use std::future::Future;

/// Options for [`Crud::add`] and [`Crud::minus`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOptions {
    /// Rows to change; empty means every row.
    pub wheres: FieldMap,
    /// Amount added or subtracted.
    pub step: i64,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            wheres: FieldMap::new(),
            step: 1,
        }
    }
}

impl StepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn wheres(mut self, wheres: FieldMap) -> Self {
        self.wheres = wheres;
        self
    }
}

/// Table-level helpers, available on every [`GenericClient`].
///
/// Passing `None` or an empty map as `wheres` omits the `WHERE` clause, so
/// [`Crud::update`] and [`Crud::delete`] then touch every row of the table.
pub trait Crud: GenericClient {
    /// Physical table name: `name`, or `<prefix>_<name>` when the handle has a prefix.
    fn table_name(&self, name: &str) -> String {
        prefixed(self.table_prefix(), name)
    }

    /// `SELECT COUNT(0)` over the matching rows.
    fn count(
        &self,
        table: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<i64>> + Send {
        async move {
            let (sql, params) = count_sql(&self.table_name(table), wheres)?;
            match self.query_row(&sql, &params).await? {
                Some(row) => row.get::<i64>("num_rows"),
                None => Ok(0),
            }
        }
    }

    /// [`Crud::count`] that logs any failure at `warn` and reports 0 instead.
    fn count_or_zero(
        &self,
        table: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = i64> + Send {
        async move {
            match self.count(table, wheres).await {
                Ok(n) => n,
                Err(error) => {
                    tracing::warn!(target: "mysqlx.sql", table, %error, "count failed, reporting 0");
                    0
                }
            }
        }
    }

    /// `INSERT INTO ... SET ...`, returning the generated id (0 if none).
    fn insert(
        &self,
        table: &str,
        fields: &FieldMap,
    ) -> impl Future<Output = DbResult<u64>> + Send {
        async move {
            let (sql, params) =
                insert_sql(&self.table_name(table), fields, self.string_sentinels())?;
            Ok(self.execute(&sql, &params).await?.last_insert_id)
        }
    }

    /// `UPDATE ... SET ... [WHERE ...]`, returning the number of rows affected.
    fn update(
        &self,
        table: &str,
        fields: &FieldMap,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<u64>> + Send {
        async move {
            let (sql, params) =
                update_sql(&self.table_name(table), fields, wheres, self.string_sentinels())?;
            Ok(self.execute(&sql, &params).await?.rows_affected)
        }
    }

    /// `DELETE FROM ... [WHERE ...]`, returning the number of rows affected.
    fn delete(
        &self,
        table: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<u64>> + Send {
        async move {
            let (sql, params) = delete_sql(&self.table_name(table), wheres)?;
            Ok(self.execute(&sql, &params).await?.rows_affected)
        }
    }

    /// Atomically increase `column` by `opts.step`.
    fn add(
        &self,
        table: &str,
        column: &str,
        opts: StepOptions,
    ) -> impl Future<Output = DbResult<u64>> + Send {
        async move {
            let (sql, params) = step_sql(&self.table_name(table), column, '+', &opts)?;
            Ok(self.execute(&sql, &params).await?.rows_affected)
        }
    }

    /// Atomically decrease `column` by `opts.step`.
    fn minus(
        &self,
        table: &str,
        column: &str,
        opts: StepOptions,
    ) -> impl Future<Output = DbResult<u64>> + Send {
        async move {
            let (sql, params) = step_sql(&self.table_name(table), column, '-', &opts)?;
            Ok(self.execute(&sql, &params).await?.rows_affected)
        }
    }

    /// Run `sql_prefix` (e.g. `SELECT * FROM t`) with a WHERE clause built from `wheres`.
    fn fetch_rows(
        &self,
        sql_prefix: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<Vec<Row>>> + Send {
        async move {
            let (sql, params) = fetch_sql(sql_prefix, wheres)?;
            self.query(&sql, &params).await
        }
    }

    /// First row of [`Crud::fetch_rows`].
    fn fetch_row(
        &self,
        sql_prefix: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<Option<Row>>> + Send {
        async move {
            let (sql, params) = fetch_sql(sql_prefix, wheres)?;
            self.query_row(&sql, &params).await
        }
    }

    fn fetch_rows_as<T: FromRow + Send>(
        &self,
        sql_prefix: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<Vec<T>>> + Send {
        async move {
            self.fetch_rows(sql_prefix, wheres)
                .await?
                .iter()
                .map(T::from_row)
                .collect()
        }
    }

    fn fetch_row_as<T: FromRow + Send>(
        &self,
        sql_prefix: &str,
        wheres: Option<&FieldMap>,
    ) -> impl Future<Output = DbResult<Option<T>>> + Send {
        async move {
            self.fetch_row(sql_prefix, wheres)
                .await?
                .as_ref()
                .map(T::from_row)
                .transpose()
        }
    }
}

impl<C: GenericClient> Crud for C {}

fn prefixed(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

fn append_where(
    wheres: Option<&FieldMap>,
    sql: &mut String,
    params: &mut Vec<Value>,
) -> DbResult<()> {
    if let Some(wheres) = wheres {
        where_fragment(wheres)?.append_clause("WHERE", sql, params);
    }
    Ok(())
}

fn count_sql(table: &str, wheres: Option<&FieldMap>) -> DbResult<(String, Vec<Value>)> {
    let mut sql = format!("SELECT COUNT(0) AS `num_rows` FROM {}", quote_ident(table)?);
    let mut params = Vec::new();
    append_where(wheres, &mut sql, &mut params)?;
    Ok((sql, params))
}

fn insert_sql(
    table: &str,
    fields: &FieldMap,
    string_sentinels: bool,
) -> DbResult<(String, Vec<Value>)> {
    if fields.is_empty() {
        return Err(DbError::validation("insert requires at least one field"));
    }
    let mut sql = format!("INSERT INTO {}", quote_ident(table)?);
    let mut params = Vec::with_capacity(fields.len());
    set_fragment(fields, string_sentinels)?.append_clause("SET", &mut sql, &mut params);
    Ok((sql, params))
}

fn update_sql(
    table: &str,
    fields: &FieldMap,
    wheres: Option<&FieldMap>,
    string_sentinels: bool,
) -> DbResult<(String, Vec<Value>)> {
    if fields.is_empty() {
        return Err(DbError::validation("update requires at least one field"));
    }
    let mut sql = format!("UPDATE {}", quote_ident(table)?);
    let mut params = Vec::with_capacity(fields.len());
    set_fragment(fields, string_sentinels)?.append_clause("SET", &mut sql, &mut params);
    append_where(wheres, &mut sql, &mut params)?;
    Ok((sql, params))
}

fn delete_sql(table: &str, wheres: Option<&FieldMap>) -> DbResult<(String, Vec<Value>)> {
    let mut sql = format!("DELETE FROM {}", quote_ident(table)?);
    let mut params = Vec::new();
    append_where(wheres, &mut sql, &mut params)?;
    Ok((sql, params))
}

fn step_sql(
    table: &str,
    column: &str,
    op: char,
    opts: &StepOptions,
) -> DbResult<(String, Vec<Value>)> {
    let column = quote_ident(column)?;
    let mut sql = format!(
        "UPDATE {} SET {column} = {column} {op} ?",
        quote_ident(table)?
    );
    let mut params = vec![Value::Int(opts.step)];
    append_where(Some(&opts.wheres), &mut sql, &mut params)?;
    Ok((sql, params))
}

fn fetch_sql(sql_prefix: &str, wheres: Option<&FieldMap>) -> DbResult<(String, Vec<Value>)> {
    let mut sql = sql_prefix.to_string();
    let mut params = Vec::new();
    append_where(wheres, &mut sql, &mut params)?;
    Ok((sql, params))
}
