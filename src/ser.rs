//! TOML serialization.
//!
//! This module provides the [`Serializer`], which writes a document tree as
//! TOML text that parses back to an equal tree.
//!
//! ## Layout
//!
//! - Within each table, plain key/value pairs come first, followed by the
//!   `[header]` sections of nested tables and `[[header]]` sections of
//!   arrays of tables.
//! - A nested table whose entries are all sections gets no header of its
//!   own; its children's headers define it implicitly.
//! - Tables inside other arrays are written inline as `{ k = v }`.
//! - Keys are bare when they consist only of `A-Za-z0-9_-`, and quoted
//!   otherwise.
//!
//! ## Usage
//!
//! ```rust
//! use toml_tree::{from_str, to_string};
//!
//! let doc = from_str("title = \"x\"\n[owner]\nname = \"Tom\"").unwrap();
//! assert_eq!(to_string(&doc), "title = \"x\"\n[owner]\nname = \"Tom\"\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use toml_tree::{toml, FormatOptions, Serializer};
//!
//! let doc = toml!({ "server": { "port": 8080 } });
//! let mut serializer = Serializer::new(FormatOptions::new());
//! serializer.serialize_table(doc.as_table().unwrap());
//! assert_eq!(serializer.into_inner(), "[server]\nport = 8080\n");
//! ```

use crate::lexer::is_bare_key_char;
use crate::{Array, FormatOptions, Table, Value};
use std::fmt::Write;

/// The TOML serializer.
///
/// Created via [`Serializer::new`]; feed it a root table with
/// [`Serializer::serialize_table`] and take the text with
/// [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: FormatOptions,
}

impl Serializer {
    pub fn new(options: FormatOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `table` as a complete document.
    pub fn serialize_table(&mut self, table: &Table) {
        let mut path = Vec::new();
        self.section_body(&mut path, table);
    }

    fn section_body(&mut self, path: &mut Vec<String>, table: &Table) {
        for (key, value) in table.iter().filter(|(_, v)| !v.is_section()) {
            write_key(&mut self.output, key);
            self.output.push_str(" = ");
            self.value(value, 0);
            self.output.push('\n');
        }

        for (key, value) in table.iter().filter(|(_, v)| v.is_section()) {
            path.push(key.clone());
            match value {
                Value::Table(child) => {
                    let implicit =
                        !child.is_empty() && child.values().all(Value::is_section);
                    if !implicit {
                        self.header(path, false);
                    }
                    self.section_body(path, child);
                }
                Value::Array(arr) => {
                    for element in arr.iter().filter_map(Value::as_table) {
                        self.header(path, true);
                        self.section_body(path, element);
                    }
                }
                _ => {}
            }
            path.pop();
        }
    }

    fn header(&mut self, path: &[String], array: bool) {
        if self.options.blank_line_between_sections && !self.output.is_empty() {
            self.output.push('\n');
        }
        let mut name = String::new();
        for (i, key) in path.iter().enumerate() {
            if i > 0 {
                name.push('.');
            }
            write_key(&mut name, key);
        }
        if array {
            log::trace!("writing [[{}]]", name);
            let _ = writeln!(self.output, "[[{}]]", name);
        } else {
            log::trace!("writing [{}]", name);
            let _ = writeln!(self.output, "[{}]", name);
        }
    }

    fn value(&mut self, value: &Value, level: usize) {
        match value {
            Value::Array(arr) if self.is_multiline(arr) => self.multiline_array(arr, level),
            other => write_inline_value(&mut self.output, other),
        }
    }

    fn is_multiline(&self, arr: &Array) -> bool {
        self.options
            .array_width
            .map_or(false, |width| arr.len() > width)
    }

    fn multiline_array(&mut self, arr: &Array, level: usize) {
        let inner = " ".repeat(self.options.indent * (level + 1));
        self.output.push_str("[\n");
        for element in arr {
            self.output.push_str(&inner);
            self.value(element, level + 1);
            self.output.push_str(",\n");
        }
        self.output.push_str(&" ".repeat(self.options.indent * level));
        self.output.push(']');
    }
}

/// Appends the single-line TOML form of `value`.
pub(crate) fn write_inline_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_basic_string(out, s),
        Value::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => write_float(out, *f),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Datetime(dt) => out.push_str(dt.as_str()),
        Value::Array(arr) => {
            out.push('[');
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_value(out, element);
            }
            out.push(']');
        }
        Value::Table(table) => {
            if table.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (i, (key, element)) in table.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(out, key);
                out.push_str(" = ");
                write_inline_value(out, element);
            }
            out.push_str(" }");
        }
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("nan");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "inf" } else { "-inf" });
    } else {
        // Debug keeps a `.0` or exponent, so the text always reads back as a float
        let _ = write!(out, "{:?}", f);
    }
}

fn write_key(out: &mut String, key: &str) {
    if !key.is_empty() && key.chars().all(is_bare_key_char) {
        out.push_str(key);
    } else {
        write_basic_string(out, key);
    }
}

fn write_basic_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{0000}'..='\u{001F}' | '\u{007F}' => {
                let _ = write!(out, "\\u{:04X}", ch as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
