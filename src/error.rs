//! Error types for TOML parsing and conversion.
//!
//! Parse failures are reported through [`Error::Parse`], which carries a
//! reason code ([`ErrorKind`]) together with the byte offset and the 1-based
//! line/column where the problem was detected. No partial document is ever
//! returned alongside an error.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{from_str, ErrorKind};
//!
//! let err = from_str("a = 1\na = 2").unwrap_err();
//! assert_eq!(err.kind(), Some(&ErrorKind::DuplicateKey("a".to_string())));
//! assert_eq!(err.line(), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Reason code attached to a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unterminated string")]
    UnterminatedString,

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("invalid number literal")]
    InvalidNumber,

    #[error("invalid datetime literal")]
    InvalidDatetime,

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error("malformed table header")]
    MalformedHeader,

    #[error("unbalanced delimiter")]
    UnbalancedDelimiter,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid UTF-8")]
    InvalidUtf8,

    /// Something other than what the grammar allows at this point.
    #[error("unexpected {0}")]
    UnexpectedToken(String),

    /// A control character where TOML forbids one.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("nesting exceeds the configured depth limit")]
    DepthLimit,
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed TOML text.
    #[error("{kind} at line {line}, column {col}")]
    Parse {
        kind: ErrorKind,
        offset: usize,
        line: usize,
        col: usize,
    },

    /// Malformed JSON text, or JSON that cannot be represented as TOML.
    #[error("JSON error: {0}")]
    Json(String),

    #[error("JSON document was not an object at its root")]
    JsonRoot,

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error located at `offset` within `input`.
    ///
    /// Line and column are derived from the offset; columns count characters,
    /// not bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{Error, ErrorKind};
    ///
    /// let err = Error::parse(ErrorKind::UnexpectedEof, "a = 1\nb =", 9);
    /// assert!(err.to_string().contains("line 2, column 4"));
    /// ```
    pub fn parse(kind: ErrorKind, input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = before[line_start..].chars().count() + 1;
        Error::Parse {
            kind,
            offset,
            line,
            col,
        }
    }

    /// The reason code, if this is a parse error.
    #[must_use]
    pub fn kind(&self) -> Option<&ErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Byte offset of a parse error.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    #[must_use]
    pub fn col(&self) -> Option<usize> {
        match self {
            Error::Parse { col, .. } => Some(*col),
            _ => None,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_offset() {
        let input = "a = 1\nbé = x";
        let offset = input.find('x').unwrap();
        let err = Error::parse(ErrorKind::UnexpectedToken("value".into()), input, offset);
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.col(), Some(6));
        assert_eq!(err.offset(), Some(offset));
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let err = Error::parse(ErrorKind::UnexpectedEof, "ab", 10);
        assert_eq!(err.offset(), Some(2));
        assert_eq!(err.col(), Some(3));
    }

    #[test]
    fn test_non_parse_errors_have_no_position() {
        let err = Error::JsonRoot;
        assert_eq!(err.kind(), None);
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("not an object"));
    }
}
