//! Convenient imports for typical `mysqlx` usage.
//!
//! ```ignore
//! use mysqlx::prelude::*;
//! ```

pub use crate::{
    Crud, Database, DatabaseConfig, DbError, DbResult, FieldMap, FromRow, GenericClient, Row,
    StepOptions, Transaction, Value, fields,
};
