//! # mysqlx
//!
//! A thin MySQL access layer built on sqlx.
//!
//! ## Features
//!
//! - **Map-driven CRUD**: `insert`, `update`, `delete`, `count`, `add`/`minus` built from [`FieldMap`]s
//! - **Always parameterised**: values are bound, never spliced into SQL text
//! - **Transaction-friendly**: [`Crud`] works on anything implementing [`GenericClient`],
//!   a pooled [`Database`] or a [`Transaction`]
//! - **Go-style DSNs**: `user:pass@tcp(host:port)/db?charset=utf8mb4` as well as `mysql://` URLs
//! - **Tracing**: every statement is logged on the `mysqlx.sql` target
//!
//! ```ignore
//! use std::time::Duration;
//! use mysqlx::prelude::*;
//!
//! let db = Database::connect(
//!     "app:secret@tcp(127.0.0.1:3306)/shop?charset=utf8mb4",
//!     DatabaseConfig::new(Duration::from_secs(100)).prefix("app"),
//! )
//! .await?;
//!
//! let id = db.insert("users", &fields! { "name" => "alice", "created_at" => Value::Now }).await?;
//! db.add("users", "logins", StepOptions::new().wheres(fields! { "id" => id })).await?;
//! let n = db.count("users", Some(&fields! { "deleted_at IS NULL" => Value::Null })).await?;
//! ```

pub mod client;
pub mod config;
pub mod crud;
pub mod database;
pub mod dsn;
pub mod error;
pub mod field_map;
pub mod fragment;
pub mod prelude;
pub mod row;
pub mod shared;
pub mod transaction;
pub mod value;

pub use client::{ExecResult, GenericClient};
pub use config::DatabaseConfig;
pub use crud::{Crud, StepOptions};
pub use database::Database;
pub use dsn::{Dsn, Net};
pub use error::{DbError, DbResult};
pub use field_map::FieldMap;
pub use fragment::{Fragment, quote_ident, set_fragment, where_fragment};
pub use row::{FromRow, Row};
pub use transaction::Transaction;
pub use value::{FromValue, Value};
