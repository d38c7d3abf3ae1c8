//! Ordered sequence of TOML values.
//!
//! Elements may be of different kinds; the parser accepts heterogeneous
//! arrays such as `[1, "two", 3.0]`.

use crate::Value;
use serde::{Serialize, Serializer};
use std::ops::{Index, IndexMut};

/// An ordered sequence of values that owns its elements.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Array, Value};
///
/// let mut arr = Array::new();
/// arr.push(Value::from(1));
/// arr.push(Value::from("two"));
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr.get(1).and_then(|v| v.as_str()), Some("two"));
///
/// arr.pop();
/// arr.pop();
/// arr.pop(); // empty: no-op
/// assert!(arr.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(Vec<Value>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Array(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array(Vec::with_capacity(capacity))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.0.get_mut(index)
    }

    /// Appends `value`, taking ownership of it.
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// Removes the last element and returns it; `None` on an empty array,
    /// which is left unchanged.
    pub fn pop(&mut self) -> Option<Value> {
        self.0.pop()
    }

    pub fn last_mut(&mut self) -> Option<&mut Value> {
        self.0.last_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.0.iter_mut()
    }

    /// True if non-empty and every element is a table.
    #[must_use]
    pub fn is_array_of_tables(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(Value::is_table)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

/// Panics when `index` is out of bounds; use [`Array::get`] to check first.
impl Index<usize> for Array {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        &mut self.0[index]
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array(values)
    }
}

impl From<Array> for Vec<Value> {
    fn from(arr: Array) -> Self {
        arr.0
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array(Vec::from_iter(iter))
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.iter() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;

    #[test]
    fn test_out_of_bounds_get_is_none() {
        let arr: Array = vec![Value::from(1)].into();
        assert!(arr.get(0).is_some());
        assert!(arr.get(1).is_none());
    }

    #[test]
    fn test_pop_returns_last() {
        let mut arr: Array = (1..=3).map(Value::from).collect();
        assert_eq!(arr.pop(), Some(Value::from(3)));
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_pop_on_empty_leaves_array_valid() {
        let mut arr = Array::new();
        assert_eq!(arr.pop(), None);
        arr.push(Value::from(true));
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn test_array_of_tables_detection() {
        assert!(!Array::new().is_array_of_tables());
        let tables: Array = vec![Value::from(Table::new()), Value::from(Table::new())].into();
        assert!(tables.is_array_of_tables());
        let mixed: Array = vec![Value::from(Table::new()), Value::from(1)].into();
        assert!(!mixed.is_array_of_tables());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_panics() {
        let arr = Array::new();
        let _ = &arr[0];
    }
}
