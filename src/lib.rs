//! # toml_tree
//!
//! A mutable, order-preserving document tree for the TOML configuration
//! format, with a parser, a serializer and path lookup.
//!
//! ## Key Features
//!
//! - **Order Preserving**: Table keys keep their insertion order, so a parsed
//!   document is re-emitted with its keys where they were
//! - **Round Trip**: Serializer output always parses back to an equal tree
//! - **Located Errors**: Parse failures carry a reason code plus the byte
//!   offset and line/column of the problem
//! - **Single Owner Tree**: Every value is owned by exactly one table slot or
//!   array slot; removing or replacing it drops the whole subtree
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! toml_tree = "0.1"
//! ```
//!
//! ### Parsing and Serializing
//!
//! ```rust
//! use toml_tree::{from_str, to_string, Value};
//!
//! let mut doc = from_str("[a]\nb = [10, 20, 30]\n").unwrap();
//! assert_eq!(doc.lookup("a.b[1]").and_then(|v| v.as_integer()), Some(20));
//!
//! doc.set("title", Value::from("example"));
//! assert_eq!(to_string(&doc), "title = \"example\"\n[a]\nb = [10, 20, 30]\n");
//! ```
//!
//! ### Editing the Tree
//!
//! ```rust
//! use toml_tree::{from_str, Value};
//!
//! let mut doc = from_str("[[servers]]\nname = \"alpha\"").unwrap();
//! let servers = doc.get_mut("servers").and_then(|v| v.as_array_mut()).unwrap();
//! servers.push(Value::from(toml_tree::Table::new()));
//! assert_eq!(servers.len(), 2);
//!
//! let removed = doc.remove("servers");
//! assert!(removed.is_some());
//! assert!(doc.is_empty());
//! ```
//!
//! ### Building Values with the toml! Macro
//!
//! ```rust
//! use toml_tree::{toml, to_string};
//!
//! let doc = toml!({
//!     "name": "Alice",
//!     "tags": ["rust", "toml"],
//!     "owner": { "active": true }
//! });
//!
//! let text = to_string(doc.as_table().unwrap());
//! assert_eq!(text, "name = \"Alice\"\ntags = [\"rust\", \"toml\"]\n[owner]\nactive = true\n");
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Parsing**: single pass, linear in the input size
//! - **Serialization**: O(n) in the number of values
//! - **Lookup**: O(segments) with one hash lookup per key
//!
//! ## Logging
//!
//! The parser and serializer log through the [`log`] facade at `trace` and
//! `debug` level. No logger is installed by this crate.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parse, query and re-emit a document
//! - **`macro.rs`** - Building values with the toml! macro
//! - **`dynamic_values.rs`** - Editing a tree in place
//! - **`custom_options.rs`** - Parse limits and output layout
//! - **`json_interop.rs`** - Converting to and from JSON
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
pub mod datetime;
pub mod de;
pub mod error;
pub mod json;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod path;
pub mod ser;
pub mod table;
pub mod value;

pub use array::Array;
pub use datetime::{Datetime, DatetimeForm};
pub use de::Parser;
pub use error::{Error, ErrorKind, Result};
pub use options::{FormatOptions, ParseOptions};
pub use ser::Serializer;
pub use table::Table;
pub use value::{Kind, Value};

use std::io;

/// Parse TOML text into a root table.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_str;
///
/// let doc = from_str("title = \"TOML\"\n[owner]\nname = \"Tom\"").unwrap();
/// assert_eq!(doc.keys(), vec!["title", "owner"]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid TOML. No partial
/// document is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Table> {
    from_str_with_options(s, &ParseOptions::default())
}

/// Parse TOML text with custom limits.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid TOML or nests deeper
/// than [`ParseOptions::max_depth`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: &ParseOptions) -> Result<Table> {
    Parser::with_options(s, options.clone()).parse()
}

/// Parse TOML from a byte span that must be UTF-8.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{from_slice, ErrorKind};
///
/// assert!(from_slice(b"a = 1").is_ok());
///
/// let err = from_slice(b"a = \"\xff\"").unwrap_err();
/// assert_eq!(err.kind(), Some(&ErrorKind::InvalidUtf8));
/// assert_eq!(err.offset(), Some(5));
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidUtf8`] located at the first invalid byte, or
/// any other parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Table> {
    match std::str::from_utf8(v) {
        Ok(s) => from_str(s),
        Err(err) => {
            let valid = err.valid_up_to();
            let prefix = std::str::from_utf8(&v[..valid]).unwrap_or_default();
            Err(Error::parse(ErrorKind::InvalidUtf8, prefix, valid))
        }
    }
}

/// Parse TOML from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use toml_tree::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"port = 8080")).unwrap();
/// assert_eq!(doc.lookup("port").and_then(|v| v.as_integer()), Some(8080));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise the same errors as
/// [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Table>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Serialize a table as a TOML document.
#[must_use]
pub fn to_string(table: &Table) -> String {
    to_string_with_options(table, &FormatOptions::default())
}

/// Serialize a table as a TOML document with custom layout.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{from_str, to_string_with_options, FormatOptions};
///
/// let doc = from_str("a = 1\n[b]\nc = 2\n[d]\n").unwrap();
/// let text = to_string_with_options(&doc, &FormatOptions::new().with_blank_lines(true));
/// assert_eq!(text, "a = 1\n\n[b]\nc = 2\n\n[d]\n");
/// ```
#[must_use]
pub fn to_string_with_options(table: &Table, options: &FormatOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.serialize_table(table);
    serializer.into_inner()
}

/// Serialize any value into an owned [`Value::String`].
///
/// Tables produce a full document; other values produce their inline
/// literal form.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{toml, to_string_value, Value};
///
/// let doc = toml!({ "a": [1, 2] });
/// assert_eq!(to_string_value(&doc), Value::from("a = [1, 2]\n"));
/// assert_eq!(to_string_value(&Value::from(1.0)), Value::from("1.0"));
/// ```
#[must_use]
pub fn to_string_value(value: &Value) -> Value {
    match value {
        Value::Table(table) => Value::String(to_string(table)),
        other => Value::String(other.to_string()),
    }
}

/// Serialize a table as TOML into a writer.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{from_str, to_writer};
///
/// let doc = from_str("a = 'x'").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"a = \"x\"\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, table: &Table) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(to_string(table).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serialize_parse() {
        let input = "title = \"x\"\n[a.b]\nc = [1, 2.5, 'three']\n[[d]]\ne = { f = true }\n[[d]]\n";
        let doc = from_str(input).unwrap();
        let text = to_string(&doc);
        assert_eq!(from_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_invalid_utf8_position() {
        let err = from_slice(b"a = 1\nb = \"\xc3\x28\"").unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::InvalidUtf8));
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.col(), Some(6));
    }

    #[test]
    fn test_reader_errors_are_io() {
        struct Failing;
        impl io::Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }
        assert!(matches!(from_reader(Failing), Err(Error::Io(_))));
    }

    #[test]
    fn test_display_forms() {
        let doc = from_str("a = [1, { b = 'c' }]").unwrap();
        assert_eq!(doc.to_string(), "a = [1, { b = \"c\" }]\n");
        assert_eq!(
            doc.get("a").map(ToString::to_string).unwrap(),
            "[1, { b = \"c\" }]"
        );
    }

    #[test]
    fn test_options_are_applied() {
        let deep = "a = [[1]]";
        assert!(from_str_with_options(deep, &ParseOptions::new().with_max_depth(1)).is_err());
        let doc = from_str("a = [1, 2]").unwrap();
        let text = to_string_with_options(&doc, &FormatOptions::new().with_array_width(1));
        assert_eq!(text, "a = [\n    1,\n    2,\n]\n");
    }
}
