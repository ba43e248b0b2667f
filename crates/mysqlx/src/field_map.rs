//! Column-name to value mappings used for SET and WHERE clauses.

use crate::error::{DbError, DbResult};
use crate::value::Value;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// An insertion-ordered mapping from column name to [`Value`].
///
/// Clause fragments are emitted in iteration order, so the generated SQL is
/// stable for a given sequence of inserts. Inserting an existing column
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, Value)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Set `column` to `value`, returning the previous value if any.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((column, value));
                None
            }
        }
    }

    /// Chainable [`FieldMap::insert`].
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == column)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a map from any serializable struct or map.
    ///
    /// The value must serialize to a JSON object; its keys keep the order in
    /// which they were serialized. Scalars map to the matching
    /// [`Value`] variant, `null` to [`Value::Null`], and nested arrays/objects
    /// are stored as [`Value::Json`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> DbResult<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(obj) => Ok(obj
                .into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect()),
            other => Err(DbError::Serialization(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::Float(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::Text(s),
        other => Value::Json(other),
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for FieldMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for FieldMap {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for FieldMap {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a str, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Value)>,
        fn(&'a (String, Value)) -> (&'a str, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(entry_ref as fn(&'a (String, Value)) -> (&'a str, &'a Value))
    }
}

fn entry_ref((k, v): &(String, Value)) -> (&str, &Value) {
    (k.as_str(), v)
}

/// Build a [`FieldMap`] inline.
///
/// ```ignore
/// let data = mysqlx::fields! {
///     "name" => "alice",
///     "age" => 30,
///     "deleted_at" => mysqlx::Value::Null,
/// };
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::FieldMap::new() };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $( map.insert($column, $value); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut map = FieldMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        assert_eq!(map.insert("b", 3), Some(Value::Int(1)));

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(&Value::Int(3)));
    }

    #[test]
    fn fields_macro_builds_map() {
        let map = crate::fields! { "name" => "alice", "age" => 30_i64 };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::Text("alice".into())));
    }

    #[test]
    fn remove_drops_entry() {
        let mut map = crate::fields! { "a" => 1, "b" => 2 };
        assert_eq!(map.remove("a"), Some(Value::Int(1)));
        assert!(!map.contains("a"));
        assert_eq!(map.remove("missing"), None);
    }

    #[derive(Serialize)]
    struct NewUser<'a> {
        name: &'a str,
        age: u32,
        email: Option<&'a str>,
        tags: Vec<&'a str>,
    }

    #[test]
    fn from_serialize_maps_struct_fields() {
        let map = FieldMap::from_serialize(&NewUser {
            name: "bob",
            age: 41,
            email: None,
            tags: vec!["x"],
        })
        .unwrap();

        assert_eq!(map.get("name"), Some(&Value::Text("bob".into())));
        assert_eq!(map.get("age"), Some(&Value::Int(41)));
        assert_eq!(map.get("email"), Some(&Value::Null));
        assert_eq!(map.get("tags"), Some(&Value::Json(serde_json::json!(["x"]))));
    }

    #[test]
    fn from_serialize_keeps_declaration_order() {
        let map = FieldMap::from_serialize(&NewUser {
            name: "bob",
            age: 41,
            email: None,
            tags: vec![],
        })
        .unwrap();

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "age", "email", "tags"]);
    }

    #[test]
    fn from_serialize_rejects_non_objects() {
        let err = FieldMap::from_serialize(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
