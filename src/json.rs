//! Conversion between TOML trees and JSON.
//!
//! JSON and TOML do not line up exactly:
//!
//! - JSON `null` has no TOML counterpart; nulls inside objects and arrays
//!   are dropped on import.
//! - Unsigned JSON integers above `i64::MAX` are imported as floats.
//! - Datetimes export as JSON strings holding the literal text.
//! - `nan` and infinite floats export as `null`.
//!
//! Object key order is kept in both directions.
//!
//! ```rust
//! use toml_tree::json;
//!
//! let input = br#"{"name": "demo", "gone": null, "ids": [1, null, 2]}"#;
//! let table = json::from_json_slice(input).unwrap();
//! assert_eq!(table.keys(), vec!["name", "ids"]);
//! assert_eq!(table.lookup("ids[1]").and_then(|v| v.as_integer()), Some(2));
//!
//! let bytes = json::to_json_vec(&table).unwrap();
//! assert_eq!(bytes, br#"{"name":"demo","ids":[1,2]}"#);
//! ```

use crate::{Array, Error, Result, Table, Value};
use serde_json::{Map, Number, Value as Json};

/// Parses JSON bytes whose root is an object into a root table.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON and [`Error::JsonRoot`] when
/// the root is not an object.
pub fn from_json_slice(bytes: &[u8]) -> Result<Table> {
    match serde_json::from_slice::<Json>(bytes)? {
        Json::Object(map) => {
            let table = object_to_table(map);
            log::debug!("imported {} top-level keys from JSON", table.len());
            Ok(table)
        }
        _ => Err(Error::JsonRoot),
    }
}

/// Converts a table into a JSON object.
pub fn to_json_value(table: &Table) -> Json {
    Json::Object(table_to_object(table))
}

/// Serializes a table as compact JSON bytes.
///
/// # Errors
///
/// Returns [`Error::Json`] if serde_json fails to write the document.
pub fn to_json_vec(table: &Table) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&to_json_value(table))?)
}

fn object_to_table(map: Map<String, Json>) -> Table {
    map.into_iter()
        .filter_map(|(key, json)| Some((key, from_json(json)?)))
        .collect()
}

fn from_json(json: Json) -> Option<Value> {
    Some(match json {
        Json::Null => return None,
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::Integer(i),
            (None, Some(u)) => Value::Float(u as f64),
            (None, None) => Value::Float(n.as_f64()?),
        },
        Json::String(s) => Value::String(s),
        Json::Array(items) => {
            Value::Array(items.into_iter().filter_map(from_json).collect::<Array>())
        }
        Json::Object(map) => Value::Table(object_to_table(map)),
    })
}

fn table_to_object(table: &Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), to_json(value)))
        .collect()
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Datetime(dt) => Json::String(dt.as_str().to_string()),
        Value::Array(arr) => Json::Array(arr.iter().map(to_json).collect()),
        Value::Table(table) => Json::Object(table_to_object(table)),
    }
}
