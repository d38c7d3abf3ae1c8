//! Path expressions over a document tree.
//!
//! A path is a sequence of key segments separated by `.`, each optionally
//! followed by bracketed indices: `servers[1].ports[0]`. Keys that contain
//! `.`, `[` or `]` can be quoted with `"` or `'`: `site."google.com"`.
//!
//! Lookup never creates structure. An absent key, an out-of-range index,
//! stepping into the wrong kind of value, or a path that does not follow the
//! syntax above all resolve to `None`.
//!
//! ```rust
//! use toml_tree::from_str;
//!
//! let doc = from_str("[a]\nb = [10, 20, 30]").unwrap();
//! assert_eq!(doc.lookup("a.b[1]").and_then(|v| v.as_integer()), Some(20));
//! assert!(doc.lookup("a.b[5]").is_none());
//! assert!(doc.lookup("x.y").is_none());
//! assert!(doc.lookup("a.b[").is_none());
//! ```

use crate::{Table, Value};
use std::borrow::Cow;

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Key(Cow<'a, str>),
    Index(usize),
}

/// Resolves `path` below `root`. The empty path resolves to `root` itself.
pub fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    segments(path)?
        .iter()
        .try_fold(root, |current, segment| match segment {
            Segment::Key(key) => current.as_table()?.get(key),
            Segment::Index(index) => current.as_array()?.get(*index),
        })
}

/// Mutable variant of [`lookup`].
pub fn lookup_mut<'v>(root: &'v mut Value, path: &str) -> Option<&'v mut Value> {
    segments(path)?
        .iter()
        .try_fold(root, |current, segment| match segment {
            Segment::Key(key) => current.as_table_mut()?.get_mut(key),
            Segment::Index(index) => current.as_array_mut()?.get_mut(*index),
        })
}

/// Resolves `path` below a root table. The path must start with a key; the
/// empty path names the table itself, which is not a [`Value`], so it
/// resolves to `None`.
pub(crate) fn lookup_in_table<'t>(table: &'t Table, path: &str) -> Option<&'t Value> {
    let segments = segments(path)?;
    let (first, rest) = segments.split_first()?;
    let Segment::Key(key) = first else {
        return None;
    };
    rest.iter()
        .try_fold(table.get(key)?, |current, segment| match segment {
            Segment::Key(key) => current.as_table()?.get(key),
            Segment::Index(index) => current.as_array()?.get(*index),
        })
}

fn segments(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    if path.is_empty() {
        return Some(segments);
    }
    let mut rest = path;
    let mut expect_key = !path.starts_with('[');
    while !rest.is_empty() || expect_key {
        if expect_key {
            let (key, tail) = key(rest)?;
            segments.push(Segment::Key(key));
            rest = tail;
            expect_key = false;
        } else if let Some(tail) = rest.strip_prefix('[') {
            let close = tail.find(']')?;
            let digits = &tail[..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            segments.push(Segment::Index(digits.parse().ok()?));
            rest = &tail[close + 1..];
        } else if let Some(tail) = rest.strip_prefix('.') {
            rest = tail;
            expect_key = true;
        } else {
            return None;
        }
    }
    Some(segments)
}

/// Splits one key segment off the front of `text`.
fn key(text: &str) -> Option<(Cow<'_, str>, &str)> {
    match text.chars().next()? {
        '\'' => {
            let end = text[1..].find('\'')? + 1;
            Some((Cow::Borrowed(&text[1..end]), &text[end + 1..]))
        }
        '"' => {
            let mut key = String::new();
            let mut chars = text.char_indices().skip(1);
            while let Some((i, c)) = chars.next() {
                match c {
                    '"' => return Some((Cow::Owned(key), &text[i + 1..])),
                    '\\' => match chars.next()?.1 {
                        c @ ('"' | '\\') => key.push(c),
                        _ => return None,
                    },
                    c => key.push(c),
                }
            }
            None
        }
        _ => {
            let end = text
                .find(|c: char| matches!(c, '.' | '[' | ']' | '"' | '\''))
                .unwrap_or(text.len());
            if end == 0 {
                return None;
            }
            Some((Cow::Borrowed(&text[..end]), &text[end..]))
        }
    }
}
