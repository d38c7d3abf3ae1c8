//! Ordered table type for TOML documents.
//!
//! [`Table`] is a wrapper around [`IndexMap`] that keeps keys in insertion
//! order. Re-emitting a parsed document reproduces its original key order,
//! and replacing a key's value keeps the key where it was.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{Table, Value};
//!
//! let mut table = Table::new();
//! table.set("a", Value::from(1));
//! table.set("b", Value::from(2));
//! table.set("c", Value::from(3));
//! table.set("b", Value::from("replaced"));
//!
//! assert_eq!(table.keys(), vec!["a", "b", "c"]);
//! assert_eq!(table.get("b").and_then(|v| v.as_str()), Some("replaced"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// An ordered map of string keys to TOML values.
///
/// The table owns every contained value. Replacing or removing a key drops
/// the previous value together with its whole subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Table;
    ///
    /// let table = Table::with_capacity(10);
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Number of keys in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys in insertion order as of this call.
    ///
    /// The result is an owned snapshot; later mutation of the table does not
    /// affect it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.set("first", Value::from(1));
    /// let keys = table.keys();
    /// table.remove("first");
    /// assert_eq!(keys, vec!["first"]);
    /// ```
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Returns the key at `index` in insertion order.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(|(k, _)| k.as_str())
    }

    /// Returns a reference to the value at `key`, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Stores `value` at `key`, taking ownership of it.
    ///
    /// A new key is appended after the existing ones. An existing key keeps
    /// its position and its previous value is returned, so dropping the
    /// result destroys the old subtree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// assert!(table.set("key", Value::from(42)).is_none());
    /// assert_eq!(table.set("key", Value::from(43)), Some(Value::from(42)));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes `key` and returns its value. Absent keys are a no-op.
    ///
    /// The order of the remaining keys is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Resolves a path such as `a.b[0].c` below this table.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        crate::path::lookup_in_table(self, path)
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }
}

/// Formats the table as a TOML document.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected table, found {}",
                other.kind()
            ))),
        }
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_follow_insertion_order() {
        let mut table = Table::new();
        for key in ["zeta", "alpha", "mid"] {
            table.set(key, Value::from(0));
        }
        assert_eq!(table.keys(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.key_at(1), Some("alpha"));
        assert_eq!(table.key_at(3), None);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = Table::new();
        table.set("a", Value::from(1));
        table.set("b", Value::from(2));
        table.set("c", Value::from(3));
        let old = table.set("b", Value::from(Table::new()));
        assert_eq!(old, Some(Value::from(2)));
        assert_eq!(table.keys(), vec!["a", "b", "c"]);
        assert!(table.get("b").unwrap().is_table());
    }

    #[test]
    fn test_remove_preserves_remaining_order() {
        let mut table: Table = ["a", "b", "c", "d"]
            .iter()
            .map(|k| (k.to_string(), Value::from(*k)))
            .collect();
        assert_eq!(table.remove("b"), Some(Value::from("b")));
        assert_eq!(table.keys(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut table = Table::new();
        table.set("a", Value::from(1));
        assert!(table.remove("missing").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_absent_is_none() {
        let table = Table::new();
        assert!(table.get("nope").is_none());
        assert!(!table.contains_key("nope"));
    }
}
