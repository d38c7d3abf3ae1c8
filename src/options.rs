//! Configuration options for parsing and formatting.
//!
//! - [`ParseOptions`]: limits applied while parsing
//! - [`FormatOptions`]: layout of serialized output
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{from_str, to_string_with_options, FormatOptions};
//!
//! let doc = from_str("ports = [8000, 8001, 8002]").unwrap();
//!
//! let compact = to_string_with_options(&doc, &FormatOptions::new());
//! assert_eq!(compact, "ports = [8000, 8001, 8002]\n");
//!
//! let pretty = to_string_with_options(&doc, &FormatOptions::pretty().with_array_width(2));
//! assert_eq!(pretty, "ports = [\n    8000,\n    8001,\n    8002,\n]\n");
//! ```

/// Limits applied by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of the tree. Every key of a header or dotted key
    /// counts as one level, as does every array and inline table.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { max_depth: 128 }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth of the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{from_str_with_options, ErrorKind, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_max_depth(3);
    /// assert!(from_str_with_options("a = [[1]]", &options).is_ok());
    /// assert!(from_str_with_options("[a.b]\nc = 1", &options).is_ok());
    ///
    /// let err = from_str_with_options("a = [[[1]]]", &options).unwrap_err();
    /// assert_eq!(err.kind(), Some(&ErrorKind::DepthLimit));
    /// let err = from_str_with_options("[a.b]\nc.d = 1", &options).unwrap_err();
    /// assert_eq!(err.kind(), Some(&ErrorKind::DepthLimit));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Layout options for the serializer.
///
/// Output produced with any combination of options parses back to the same
/// tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per level for multi-line array elements.
    pub indent: usize,
    /// Arrays with more elements than this are written one element per
    /// line. `None` keeps every array on one line.
    pub array_width: Option<usize>,
    /// Separate `[header]` sections with an empty line.
    pub blank_line_between_sections: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent: 4,
            array_width: None,
            blank_line_between_sections: false,
        }
    }
}

impl FormatOptions {
    /// Compact output: inline arrays, no blank lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multi-line arrays beyond 4 elements and blank lines between sections.
    #[must_use]
    pub fn pretty() -> Self {
        FormatOptions {
            indent: 4,
            array_width: Some(4),
            blank_line_between_sections: true,
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_array_width(mut self, width: usize) -> Self {
        self.array_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_blank_lines(mut self, enabled: bool) -> Self {
        self.blank_line_between_sections = enabled;
        self
    }
}
