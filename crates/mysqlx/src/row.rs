//! Owned result rows and row mapping traits

use crate::error::{DbError, DbResult};
use crate::value::{FromValue, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use std::sync::Arc;

/// A fully decoded result row.
///
/// Rows are detached from the driver so the same type comes back from a
/// pooled connection, a transaction, or a test double.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from column names and values of equal length.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> DbResult<Self> {
        if columns.len() != values.len() {
            return Err(DbError::validation(format!(
                "row has {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value by column name.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    /// Typed value by column name.
    pub fn get<T: FromValue>(&self, column: &str) -> DbResult<T> {
        let value = self
            .value(column)
            .ok_or_else(|| DbError::decode(column, "no such column"))?;
        T::from_value(value).map_err(|msg| DbError::decode(column, msg))
    }

    /// Typed value by position.
    pub fn get_index<T: FromValue>(&self, idx: usize) -> DbResult<T> {
        let value = self
            .values
            .get(idx)
            .ok_or_else(|| DbError::decode(idx.to_string(), "column index out of range"))?;
        T::from_value(value).map_err(|msg| DbError::decode(self.columns[idx].clone(), msg))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Map a [`Row`] into a Rust type.
///
/// ```ignore
/// struct User { id: i64, name: String }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> DbResult<Self> {
///         Ok(Self { id: row.get("id")?, name: row.get("name")? })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> DbResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(row.clone())
    }
}

/// Decode every row of a driver result, sharing one column list.
pub(crate) fn decode_rows(rows: &[MySqlRow]) -> DbResult<Vec<Row>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    rows.iter()
        .map(|row| {
            let values = (0..columns.len())
                .map(|idx| decode_column(row, idx, &columns[idx]))
                .collect::<DbResult<Vec<_>>>()?;
            Ok(Row {
                columns: Arc::clone(&columns),
                values,
            })
        })
        .collect()
}

fn decode_column(row: &MySqlRow, idx: usize, name: &str) -> DbResult<Value> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_ascii_uppercase();
    let err = |e: sqlx::Error| DbError::decode(name, e.to_string());

    let value = match type_name.as_str() {
        "BOOLEAN" => Value::Bool(row.try_get(idx).map_err(err)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::Int(row.try_get(idx).map_err(err)?)
        }
        t if t.ends_with("UNSIGNED") => Value::UInt(row.try_get(idx).map_err(err)?),
        "FLOAT" => Value::Float(f64::from(row.try_get::<f32, _>(idx).map_err(err)?)),
        "DOUBLE" => Value::Float(row.try_get(idx).map_err(err)?),
        "DECIMAL" => Value::Decimal(row.try_get(idx).map_err(err)?),
        "DATE" => Value::Date(row.try_get(idx).map_err(err)?),
        "TIME" => Value::Time(row.try_get(idx).map_err(err)?),
        "DATETIME" | "TIMESTAMP" => Value::DateTime(row.try_get(idx).map_err(err)?),
        "JSON" => Value::Json(row.try_get(idx).map_err(err)?),
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            Value::Bytes(row.try_get(idx).map_err(err)?)
        }
        _ => match row.try_get::<String, _>(idx) {
            Ok(s) => Value::Text(s),
            Err(_) => Value::Bytes(row.try_get(idx).map_err(err)?),
        },
    };
    Ok(value)
}
