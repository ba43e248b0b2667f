//! SET / WHERE clause fragments built from a [`FieldMap`].
//!
//! A [`Fragment`] is clause text with `?` placeholders plus the ordered list of
//! values bound to them. Two builders exist:
//!
//! - [`where_fragment`]: `` `a` = ? AND `b` = ? ``; a [`Value::Null`] entry emits the
//!   key verbatim so callers can pass raw predicates such as `deleted_at IS NULL`.
//! - [`set_fragment`]: `` `a` = ?, `b` = NULL, `c` = NOW() ``.
//!
//! # String sentinels
//!
//! When sentinel interpretation is on (the default), a `Text` value equal to
//! `"null"` or `"now()"` (any case) in a SET map is rendered as the SQL keyword
//! instead of being bound. There is no escape: a column cannot be set to the
//! literal text `"null"` while this is enabled. Prefer [`Value::Null`] and
//! [`Value::Now`], and turn sentinels off via
//! [`DatabaseConfig::string_sentinels`](crate::DatabaseConfig::string_sentinels)
//! when storing arbitrary user text.

use crate::error::{DbError, DbResult};
use crate::field_map::FieldMap;
use crate::value::Value;

/// SQL rendered for [`Value::Now`] and the `"now()"` sentinel.
pub const CURRENT_TIMESTAMP: &str = "NOW()";

/// Clause text plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Append ` <keyword> <fragment>` to `sql` and move the params into `args`.
    ///
    /// An empty fragment appends nothing.
    pub fn append_clause(self, keyword: &str, sql: &mut String, args: &mut Vec<Value>) {
        if self.is_empty() {
            return;
        }
        sql.push(' ');
        sql.push_str(keyword);
        sql.push(' ');
        sql.push_str(&self.sql);
        args.extend(self.params);
    }
}

/// How a value is rendered in a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rendered {
    Null,
    Now,
    Bind,
}

fn render_set(value: &Value, string_sentinels: bool) -> Rendered {
    match value {
        Value::Null => Rendered::Null,
        Value::Now => Rendered::Now,
        Value::Text(s) if string_sentinels => match sentinel(s) {
            Some(r) => r,
            None => Rendered::Bind,
        },
        _ => Rendered::Bind,
    }
}

fn sentinel(s: &str) -> Option<Rendered> {
    if s.eq_ignore_ascii_case("null") {
        Some(Rendered::Null)
    } else if s.eq_ignore_ascii_case("now()") {
        Some(Rendered::Now)
    } else {
        None
    }
}

/// Quote a column or table identifier with backticks, doubling embedded backticks.
pub fn quote_ident(ident: &str) -> DbResult<String> {
    if ident.is_empty() {
        return Err(DbError::validation("identifier cannot be empty"));
    }
    if ident.contains('\0') {
        return Err(DbError::validation("identifier cannot contain NUL character"));
    }
    let mut out = String::with_capacity(ident.len() + 2);
    out.push('`');
    for c in ident.chars() {
        if c == '`' {
            out.push('`');
        }
        out.push(c);
    }
    out.push('`');
    Ok(out)
}

/// Build a WHERE fragment (without the `WHERE` keyword).
///
/// Entries are joined with ` AND `. An empty map yields an empty fragment; the
/// caller must then omit the `WHERE` keyword.
pub fn where_fragment(wheres: &FieldMap) -> DbResult<Fragment> {
    let mut parts = Vec::with_capacity(wheres.len());
    let mut params = Vec::new();

    for (column, value) in wheres {
        match value {
            Value::Null => {
                if column.trim().is_empty() {
                    return Err(DbError::validation("raw WHERE predicate cannot be empty"));
                }
                parts.push(column.to_string());
            }
            Value::Now => {
                parts.push(format!("{} = {CURRENT_TIMESTAMP}", quote_ident(column)?));
            }
            other => {
                parts.push(format!("{} = ?", quote_ident(column)?));
                params.push(other.clone());
            }
        }
    }

    Ok(Fragment {
        sql: parts.join(" AND "),
        params,
    })
}

/// Build a SET fragment (without the `SET` keyword).
///
/// Entries are joined with `, `. See the module docs for the sentinel rules
/// controlled by `string_sentinels`.
pub fn set_fragment(fields: &FieldMap, string_sentinels: bool) -> DbResult<Fragment> {
    let mut parts = Vec::with_capacity(fields.len());
    let mut params = Vec::new();

    for (column, value) in fields {
        let column = quote_ident(column)?;
        match render_set(value, string_sentinels) {
            Rendered::Null => parts.push(format!("{column} = NULL")),
            Rendered::Now => parts.push(format!("{column} = {CURRENT_TIMESTAMP}")),
            Rendered::Bind => {
                parts.push(format!("{column} = ?"));
                params.push(value.clone());
            }
        }
    }

    Ok(Fragment {
        sql: parts.join(", "),
        params,
    })
}
