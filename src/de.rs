//! TOML parsing.
//!
//! This module provides the [`Parser`], a recursive-descent parser over the
//! tokens produced by [`crate::lexer`]. It builds the document tree directly
//! and either returns the complete root [`Table`] or fails without returning
//! any partial document.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use toml_tree::from_str;
//!
//! let doc = from_str("[server]\nhost = \"localhost\"\nport = 8080").unwrap();
//! assert_eq!(doc.lookup("server.port").and_then(|v| v.as_integer()), Some(8080));
//! ```
//!
//! ## Table definitions
//!
//! The parser tracks how each table came to exist so that it can reject
//! redefinitions: a table may be defined by its own `[header]` only once,
//! tables created by dotted keys cannot be reopened with a header, and
//! inline tables and inline arrays are closed once written.

use crate::lexer::{Lexer, Mode, Spanned, Token};
use crate::{Array, Datetime, Error, ErrorKind, ParseOptions, Result, Table, Value};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// One step of a resolved path: a key, plus the element index when the key
/// names an array of tables.
type Segment = (String, Option<usize>);

/// Node id of the table a [`Nodes`] registry is rooted at.
const ROOT: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TableState {
    /// Parent of a header, like `a` in `[a.b]`. May still get its own header.
    Implicit,
    /// Defined by its own `[header]`, or an element of an `[[array]]`.
    Header,
    /// Created by a dotted key such as `a.b = 1`.
    Dotted,
    /// Array created by `[[header]]`.
    ArrayOfTables,
}

/// States of the tables and arrays of tables that may still be extended.
///
/// Each node is keyed by its parent's id and its own key, so walking a path
/// costs one lookup per segment.
struct Nodes {
    ids: HashMap<(usize, String, Option<usize>), usize>,
    states: Vec<TableState>,
}

impl Nodes {
    fn new() -> Self {
        Nodes {
            ids: HashMap::new(),
            states: vec![TableState::Header],
        }
    }

    fn get(&self, parent: usize, key: &str, index: Option<usize>) -> Option<(usize, TableState)> {
        let id = *self.ids.get(&(parent, key.to_string(), index))?;
        self.states.get(id).map(|state| (id, *state))
    }

    /// Records `state` for the node, creating it if needed, and returns its id.
    fn set(&mut self, parent: usize, key: &str, index: Option<usize>, state: TableState) -> usize {
        match self.ids.entry((parent, key.to_string(), index)) {
            Entry::Occupied(entry) => {
                let id = *entry.get();
                if let Some(slot) = self.states.get_mut(id) {
                    *slot = state;
                }
                id
            }
            Entry::Vacant(entry) => {
                let id = self.states.len();
                self.states.push(state);
                entry.insert(id);
                id
            }
        }
    }
}

/// The TOML parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    root: Table,
    /// Resolved path of the table that receives key/value pairs.
    current: Vec<Segment>,
    /// Node id of `current`.
    current_node: usize,
    /// Anything not recorded here came from an inline value and is closed.
    nodes: Nodes,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            lexer: Lexer::new(input),
            options,
            root: Table::new(),
            current: Vec::new(),
            current_node: ROOT,
            nodes: Nodes::new(),
        }
    }

    /// Parses the whole input into a root table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the reason and location of the first
    /// problem found.
    pub fn parse(mut self) -> Result<Table> {
        match self.document() {
            Ok(()) => {
                log::debug!(
                    "parsed {} bytes into {} top-level keys",
                    self.lexer.input().len(),
                    self.root.len()
                );
                Ok(self.root)
            }
            Err(err) => {
                log::debug!("parse failed: {}", err);
                Err(err)
            }
        }
    }

    fn document(&mut self) -> Result<()> {
        loop {
            let next = self.lexer.peek_token(Mode::Key)?;
            match next.token {
                Token::Eof => return Ok(()),
                Token::Newline | Token::Comment(_) => {
                    self.lexer.next_token(Mode::Key)?;
                }
                Token::LeftBracket => {
                    self.header()?;
                    self.end_of_line()?;
                }
                Token::BareKey(_) | Token::String { .. } => {
                    let (keys, at) = self.dotted_key()?;
                    let depth = self.current.len() + keys.len();
                    self.check_depth(depth, at)?;
                    self.expect_equals()?;
                    let value = self.value(depth)?;
                    self.insert_in_section(keys, value, at)?;
                    self.end_of_line()?;
                }
                _ => return Err(self.unexpected(&next, "a key or table header")),
            }
        }
    }

    fn unexpected(&self, spanned: &Spanned<'_>, expected: &str) -> Error {
        let kind = match spanned.token {
            Token::Eof => ErrorKind::UnexpectedEof,
            ref other => {
                ErrorKind::UnexpectedToken(format!("{}, expected {}", other.describe(), expected))
            }
        };
        self.lexer.error(kind, spanned.start)
    }

    /// Consumes an optional comment and the newline (or end of input) that
    /// must follow every expression.
    fn end_of_line(&mut self) -> Result<()> {
        let mut next = self.lexer.next_token(Mode::Key)?;
        if let Token::Comment(_) = next.token {
            next = self.lexer.next_token(Mode::Key)?;
        }
        match next.token {
            Token::Newline | Token::Eof => Ok(()),
            _ => Err(self.unexpected(&next, "a newline")),
        }
    }

    fn key(&mut self) -> Result<String> {
        let next = self.lexer.next_token(Mode::Key)?;
        match next.token {
            Token::BareKey(key) => Ok(key.to_string()),
            Token::String { value, style } if !style.is_multiline() => Ok(value.into_owned()),
            Token::String { .. } => Err(self.lexer.error(
                ErrorKind::UnexpectedToken("multi-line string used as a key".to_string()),
                next.start,
            )),
            _ => Err(self.unexpected(&next, "a key")),
        }
    }

    /// Reads `a.b."c"` and returns the segments with the offset of the first.
    fn dotted_key(&mut self) -> Result<(Vec<String>, usize)> {
        let at = self.lexer.peek_token(Mode::Key)?.start;
        let mut keys = vec![self.key()?];
        while self.lexer.peek_token(Mode::Key)?.token == Token::Dot {
            self.lexer.next_token(Mode::Key)?;
            keys.push(self.key()?);
        }
        Ok((keys, at))
    }

    fn expect_equals(&mut self) -> Result<()> {
        let next = self.lexer.next_token(Mode::Key)?;
        match next.token {
            Token::Equals => Ok(()),
            _ => Err(self.unexpected(&next, "`=`")),
        }
    }

    fn header(&mut self) -> Result<()> {
        let open = self.lexer.next_token(Mode::Key)?;
        let array = self.lexer.next_is_adjacent(b'[');
        if array {
            self.lexer.next_token(Mode::Key)?;
        }

        let keys = match self.dotted_key() {
            Ok((keys, _)) => keys,
            Err(err) => {
                let grammar = matches!(
                    err.kind(),
                    Some(ErrorKind::UnexpectedToken(_) | ErrorKind::UnexpectedEof)
                );
                if grammar {
                    return Err(self.lexer.error(ErrorKind::MalformedHeader, open.start));
                }
                return Err(err);
            }
        };

        if self.lexer.next_token(Mode::Key)?.token != Token::RightBracket {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, open.start));
        }
        if array {
            if !self.lexer.next_is_adjacent(b']') {
                return Err(self.lexer.error(ErrorKind::MalformedHeader, open.start));
            }
            self.lexer.next_token(Mode::Key)?;
        }

        self.check_depth(keys.len(), open.start)?;

        if array {
            log::trace!("array of tables [[{}]]", keys.join("."));
            self.open_array_table(&keys, open.start)
        } else {
            log::trace!("table [{}]", keys.join("."));
            self.open_table(&keys, open.start)
        }
    }

    fn duplicate(&self, key: &str, at: usize) -> Error {
        self.lexer.error(ErrorKind::DuplicateKey(key.to_string()), at)
    }

    /// Walks the parents of a header, creating implicit tables as needed and
    /// stepping into the last element of arrays of tables. Returns the
    /// resolved path and the node id of the last parent.
    fn descend_headers(&mut self, parents: &[String], at: usize) -> Result<(Vec<Segment>, usize)> {
        let mut path: Vec<Segment> = Vec::with_capacity(parents.len());
        let input = self.lexer.input();
        let mut node = ROOT;
        let mut table = &mut self.root;
        for key in parents {
            let known = self.nodes.get(node, key, None);
            let index = match (table.get(key), known) {
                (None, _) => {
                    table.set(key.clone(), Value::Table(Table::new()));
                    node = self.nodes.set(node, key, None, TableState::Implicit);
                    None
                }
                (
                    Some(Value::Table(_)),
                    Some((id, TableState::Implicit | TableState::Header | TableState::Dotted)),
                ) => {
                    node = id;
                    None
                }
                (Some(Value::Array(arr)), Some((_, TableState::ArrayOfTables))) => {
                    let last = arr.len().saturating_sub(1);
                    match self.nodes.get(node, key, Some(last)) {
                        Some((id, _)) => node = id,
                        None => return Err(Error::parse(ErrorKind::MalformedHeader, input, at)),
                    }
                    Some(last)
                }
                _ => {
                    let kind = ErrorKind::DuplicateKey(key.clone());
                    return Err(Error::parse(kind, input, at));
                }
            };
            let segment = (key.clone(), index);
            table = match step(table, &segment) {
                Some(next) => next,
                None => return Err(Error::parse(ErrorKind::MalformedHeader, input, at)),
            };
            path.push(segment);
        }
        Ok((path, node))
    }

    fn open_table(&mut self, keys: &[String], at: usize) -> Result<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, at));
        };
        let (mut path, parent_node) = self.descend_headers(parents, at)?;
        let Some(parent) = table_at(&mut self.root, &path) else {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, at));
        };
        let state = self.nodes.get(parent_node, last, None).map(|(_, state)| state);
        match parent.get(last) {
            None => {
                parent.set(last.clone(), Value::Table(Table::new()));
            }
            Some(Value::Table(_)) if state == Some(TableState::Implicit) => {}
            Some(_) => return Err(self.duplicate(last, at)),
        }
        self.current_node = self.nodes.set(parent_node, last, None, TableState::Header);
        path.push((last.clone(), None));
        self.current = path;
        Ok(())
    }

    fn open_array_table(&mut self, keys: &[String], at: usize) -> Result<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, at));
        };
        let (mut path, parent_node) = self.descend_headers(parents, at)?;
        let Some(parent) = table_at(&mut self.root, &path) else {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, at));
        };
        let state = self.nodes.get(parent_node, last, None).map(|(_, state)| state);
        let index = match parent.get_mut(last) {
            None => {
                let arr = Array::from(vec![Value::Table(Table::new())]);
                parent.set(last.clone(), Value::Array(arr));
                0
            }
            Some(Value::Array(arr)) if state == Some(TableState::ArrayOfTables) => {
                arr.push(Value::Table(Table::new()));
                arr.len() - 1
            }
            Some(_) => return Err(self.duplicate(last, at)),
        };
        self.nodes.set(parent_node, last, None, TableState::ArrayOfTables);
        self.current_node = self.nodes.set(parent_node, last, Some(index), TableState::Header);
        path.push((last.clone(), Some(index)));
        self.current = path;
        Ok(())
    }

    /// Inserts `keys = value` into the current section, creating the tables
    /// named by a dotted key.
    fn insert_in_section(&mut self, keys: Vec<String>, value: Value, at: usize) -> Result<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(self.lexer.error(ErrorKind::UnexpectedEof, at));
        };
        let input = self.lexer.input();
        let Some(mut table) = table_at(&mut self.root, &self.current) else {
            return Err(self.lexer.error(ErrorKind::MalformedHeader, at));
        };
        let mut node = self.current_node;
        for key in parents {
            let known = self.nodes.get(node, key, None);
            node = match (table.get(key), known) {
                (None, _) => {
                    table.set(key.clone(), Value::Table(Table::new()));
                    self.nodes.set(node, key, None, TableState::Dotted)
                }
                (Some(Value::Table(_)), Some((id, TableState::Dotted))) => id,
                (Some(Value::Table(_)), Some((_, TableState::Implicit))) => {
                    self.nodes.set(node, key, None, TableState::Dotted)
                }
                _ => {
                    let kind = ErrorKind::DuplicateKey(key.clone());
                    return Err(Error::parse(kind, input, at));
                }
            };
            table = match table.get_mut(key).and_then(Value::as_table_mut) {
                Some(next) => next,
                None => return Err(Error::parse(ErrorKind::MalformedHeader, input, at)),
            };
        }
        if table.contains_key(last) {
            let kind = ErrorKind::DuplicateKey(last.clone());
            return Err(Error::parse(kind, input, at));
        }
        table.set(last.clone(), value);
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        let next = self.lexer.next_token(Mode::Value)?;
        match next.token {
            Token::String { value, .. } => Ok(Value::String(value.into_owned())),
            Token::Integer(i) => Ok(Value::Integer(i)),
            Token::Float(f) => Ok(Value::Float(f)),
            Token::Boolean(b) => Ok(Value::Boolean(b)),
            Token::Datetime(text) => match Datetime::parse(text) {
                Ok(dt) => Ok(Value::Datetime(dt)),
                Err(_) => Err(self.lexer.error(ErrorKind::InvalidDatetime, next.start)),
            },
            Token::LeftBracket => self.array(next.start, depth + 1),
            Token::LeftBrace => self.inline_table(next.start, depth + 1),
            _ => Err(self.unexpected(&next, "a value")),
        }
    }

    fn check_depth(&self, depth: usize, at: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(self.lexer.error(ErrorKind::DepthLimit, at));
        }
        Ok(())
    }

    /// Newlines and comments are allowed anywhere between array elements.
    fn skip_array_trivia(&mut self) -> Result<()> {
        while matches!(
            self.lexer.peek_token(Mode::Value)?.token,
            Token::Newline | Token::Comment(_)
        ) {
            self.lexer.next_token(Mode::Value)?;
        }
        Ok(())
    }

    fn array(&mut self, open: usize, depth: usize) -> Result<Value> {
        self.check_depth(depth, open)?;
        let mut arr = Array::new();
        loop {
            self.skip_array_trivia()?;
            let next = self.lexer.peek_token(Mode::Value)?;
            match next.token {
                Token::RightBracket => {
                    self.lexer.next_token(Mode::Value)?;
                    return Ok(Value::Array(arr));
                }
                Token::Eof => {
                    return Err(self.lexer.error(ErrorKind::UnbalancedDelimiter, open));
                }
                _ => {}
            }

            arr.push(self.value(depth)?);

            self.skip_array_trivia()?;
            let separator = self.lexer.next_token(Mode::Value)?;
            match separator.token {
                Token::Comma => {}
                Token::RightBracket => return Ok(Value::Array(arr)),
                Token::Eof => {
                    return Err(self.lexer.error(ErrorKind::UnbalancedDelimiter, open));
                }
                _ => return Err(self.unexpected(&separator, "`,` or `]`")),
            }
        }
    }

    fn inline_table(&mut self, open: usize, depth: usize) -> Result<Value> {
        self.check_depth(depth, open)?;
        let mut table = Table::new();
        let mut dotted = Nodes::new();

        if self.lexer.peek_token(Mode::Key)?.token == Token::RightBrace {
            self.lexer.next_token(Mode::Key)?;
            return Ok(Value::Table(table));
        }

        loop {
            if matches!(
                self.lexer.peek_token(Mode::Key)?.token,
                Token::Newline | Token::Comment(_) | Token::Eof
            ) {
                return Err(self.lexer.error(ErrorKind::UnbalancedDelimiter, open));
            }
            let (keys, at) = self.dotted_key()?;
            let key_depth = depth + keys.len();
            self.check_depth(key_depth, at)?;
            self.expect_equals()?;
            let value = self.value(key_depth)?;
            self.insert_inline(&mut table, &mut dotted, keys, value, at)?;

            let separator = self.lexer.next_token(Mode::Key)?;
            match separator.token {
                Token::Comma => {}
                Token::RightBrace => return Ok(Value::Table(table)),
                Token::Newline | Token::Comment(_) | Token::Eof => {
                    return Err(self.lexer.error(ErrorKind::UnbalancedDelimiter, open));
                }
                _ => return Err(self.unexpected(&separator, "`,` or `}`")),
            }
        }
    }

    /// Inserts into an inline table; dotted keys may only extend tables they
    /// created themselves within the same inline table.
    fn insert_inline(
        &self,
        table: &mut Table,
        dotted: &mut Nodes,
        keys: Vec<String>,
        value: Value,
        at: usize,
    ) -> Result<()> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(self.lexer.error(ErrorKind::UnexpectedEof, at));
        };
        let mut current = table;
        let mut node = ROOT;
        for key in parents {
            node = match (current.get(key), dotted.get(node, key, None)) {
                (None, _) => {
                    current.set(key.clone(), Value::Table(Table::new()));
                    dotted.set(node, key, None, TableState::Dotted)
                }
                (Some(Value::Table(_)), Some((id, _))) => id,
                _ => return Err(self.duplicate(key, at)),
            };
            current = match current.get_mut(key).and_then(Value::as_table_mut) {
                Some(next) => next,
                None => return Err(self.duplicate(key, at)),
            };
        }
        if current.contains_key(last) {
            return Err(self.duplicate(last, at));
        }
        current.set(last.clone(), value);
        Ok(())
    }
}

fn step<'t>(table: &'t mut Table, segment: &Segment) -> Option<&'t mut Table> {
    match (table.get_mut(&segment.0)?, segment.1) {
        (Value::Table(t), None) => Some(t),
        (Value::Array(arr), Some(index)) => arr.get_mut(index)?.as_table_mut(),
        _ => None,
    }
}

fn table_at<'t>(root: &'t mut Table, path: &[Segment]) -> Option<&'t mut Table> {
    path.iter().try_fold(root, |table, segment| step(table, segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Table {
        Parser::new(input).parse().unwrap()
    }

    fn parse_err(input: &str) -> ErrorKind {
        Parser::new(input)
            .parse()
            .unwrap_err()
            .kind()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_key_value_pairs() {
        let doc = parse("a = 1\nb = \"two\" # comment\n\nc = true\r\n");
        assert_eq!(doc.keys(), vec!["a", "b", "c"]);
        assert_eq!(doc.get("b").and_then(|v| v.as_str()), Some("two"));
    }

    #[test]
    fn test_dotted_keys_create_tables() {
        let doc = parse("site.\"google.com\" = true\nsite.name = 'x'");
        let site = doc.get("site").and_then(|v| v.as_table()).unwrap();
        assert_eq!(site.keys(), vec!["google.com", "name"]);
    }

    #[test]
    fn test_headers_switch_target() {
        let doc = parse("top = 0\n[a.b]\nc = 1\n[a]\nd = 2\n[x]\n");
        assert_eq!(doc.keys(), vec!["top", "a", "x"]);
        let a = doc.get("a").and_then(|v| v.as_table()).unwrap();
        assert_eq!(a.keys(), vec!["b", "d"]);
        assert!(doc.get("x").and_then(|v| v.as_table()).unwrap().is_empty());
    }

    #[test]
    fn test_array_of_tables() {
        let doc = parse(
            "[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"\n\
             [[fruit.variety]]\nname = \"red delicious\"\n\
             [[fruit]]\nname = \"banana\"\n",
        );
        let fruit = doc.get("fruit").and_then(|v| v.as_array()).unwrap();
        assert_eq!(fruit.len(), 2);
        let first = fruit.get(0).and_then(|v| v.as_table()).unwrap();
        assert_eq!(first.keys(), vec!["name", "physical", "variety"]);
        let second = fruit.get(1).and_then(|v| v.as_table()).unwrap();
        assert_eq!(second.keys(), vec!["name"]);
    }

    #[test]
    fn test_duplicate_definitions_rejected() {
        assert_eq!(parse_err("a = 1\na = 2"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("[a]\n[a]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("a = 1\n[a]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("a.b = 1\n[a]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("[a]\nb = 1\n[[a]]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("[[a]]\n[a]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("a = [1]\n[[a]]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("a = {b = 1}\n[a.c]"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(parse_err("a = {b = 1}\na.c = 2"), ErrorKind::DuplicateKey("a".into()));
        assert_eq!(
            parse_err("[a.b]\n[a]\nb.c = 1"),
            ErrorKind::DuplicateKey("b".into())
        );
    }

    #[test]
    fn test_implicit_tables_may_be_defined_once() {
        let doc = parse("[a.b.c]\nz = 1\n[a]\nx = 2\n[a.b.d]\n");
        assert_eq!(doc.lookup("a.b.c.z").and_then(|v| v.as_integer()), Some(1));
        assert_eq!(doc.lookup("a.x").and_then(|v| v.as_integer()), Some(2));
        assert_eq!(parse_err("[a.b]\n[a]\n[a]"), ErrorKind::DuplicateKey("a".into()));
    }

    #[test]
    fn test_subtable_under_dotted_table() {
        let doc = parse("[fruit]\napple.color = 'red'\n[fruit.apple.texture]\nsmooth = true\n");
        assert_eq!(
            doc.lookup("fruit.apple.texture.smooth"),
            Some(&Value::Boolean(true))
        );
        assert_eq!(
            parse_err("[fruit]\napple.color = 'red'\n[fruit.apple]"),
            ErrorKind::DuplicateKey("apple".into())
        );
    }

    #[test]
    fn test_arrays_span_lines() {
        let doc = parse("a = [\n  1, # one\n  2,\n]\nb = []\nc = [[1, 2], ['x']]");
        assert_eq!(doc.lookup("a[1]"), Some(&Value::Integer(2)));
        assert_eq!(doc.lookup("b").and_then(|v| v.as_array()).map(Array::len), Some(0));
        assert_eq!(doc.lookup("c[1][0]").and_then(|v| v.as_str()), Some("x"));
    }

    #[test]
    fn test_inline_tables() {
        let doc = parse("p = { x = 1, y.z = 2, y.w = 3 }\ne = {}");
        assert_eq!(doc.lookup("p.y.w"), Some(&Value::Integer(3)));
        assert!(doc.lookup("e").and_then(|v| v.as_table()).unwrap().is_empty());
        assert_eq!(
            parse_err("p = { x = 1, x = 2 }"),
            ErrorKind::DuplicateKey("x".into())
        );
        assert_eq!(parse_err("p = { x = 1,\n y = 2 }"), ErrorKind::UnbalancedDelimiter);
        assert_eq!(parse_err("p = { x = 1"), ErrorKind::UnbalancedDelimiter);
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(parse_err("a = [1, 2"), ErrorKind::UnbalancedDelimiter);
        assert_eq!(parse_err("a ="), ErrorKind::UnexpectedEof);
        assert_eq!(parse_err("a"), ErrorKind::UnexpectedEof);
        assert_eq!(parse_err("[a"), ErrorKind::MalformedHeader);
        assert_eq!(parse_err("[]"), ErrorKind::MalformedHeader);
        assert_eq!(parse_err("[[a]"), ErrorKind::MalformedHeader);
        assert_eq!(parse_err("[[a] ]"), ErrorKind::MalformedHeader);
        assert!(matches!(parse_err("a = 1 b = 2"), ErrorKind::UnexpectedToken(_)));
        assert!(matches!(parse_err("= 1"), ErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("a = {}{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(parse_err(&deep), ErrorKind::DepthLimit);
        let options = ParseOptions::new().with_max_depth(300);
        assert!(Parser::with_options(&deep, options).parse().is_ok());
    }

    fn dotted(segments: usize) -> String {
        vec!["a"; segments].join(".")
    }

    #[test]
    fn test_long_key_paths_hit_depth_limit() {
        assert_eq!(parse_err(&format!("[{}]\nk = 1", dotted(8000))), ErrorKind::DepthLimit);
        assert_eq!(parse_err(&format!("[[{}]]", dotted(8000))), ErrorKind::DepthLimit);
        assert_eq!(parse_err(&format!("{} = 1\n", dotted(8000))), ErrorKind::DepthLimit);
        assert_eq!(parse_err(&format!("v = {{ {} = 1 }}", dotted(8000))), ErrorKind::DepthLimit);
        assert_eq!(parse_err(&format!("[a]\n{} = 1", dotted(128))), ErrorKind::DepthLimit);
    }

    #[test]
    fn test_key_depth_counts_toward_limit() {
        let doc = parse(&format!("[{}]\nk = 1", dotted(127)));
        let path = format!("{}.k", dotted(127));
        assert_eq!(doc.lookup(&path), Some(&Value::Integer(1)));

        assert_eq!(parse_err(&format!("[{}]\nk = 1", dotted(128))), ErrorKind::DepthLimit);
        assert_eq!(parse_err(&format!("[{}]\nk = []", dotted(127))), ErrorKind::DepthLimit);
    }

    #[test]
    fn test_one_node_per_path_segment() {
        let tail = vec!["x"; 200].join(".");
        let input = format!("[{}]\nk = 1\n[{}]\n{}.b = 2\n", dotted(1000), dotted(999), tail);
        let options = ParseOptions::new().with_max_depth(2000);
        let mut parser = Parser::with_options(&input, options);
        parser.document().unwrap();
        // root, the 1000 header tables, then the 200 dotted `x` tables
        assert_eq!(parser.nodes.states.len(), 1 + 1000 + 200);
        assert_eq!(parser.current.len(), 999);
    }
}
