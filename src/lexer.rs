//! Tokenizer for TOML text.
//!
//! The grammar is context sensitive: `1979-05-27` is a valid bare key on the
//! left of `=` but a date on the right of it. The parser therefore asks for
//! each token in a [`Mode`], and the lexer scans keys and values differently.
//! The lexer is `Copy`-cheap to clone, which is how the parser peeks.

use crate::datetime;
use crate::{Error, ErrorKind, Result};
use std::borrow::Cow;

/// What the parser expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Keys, table headers and punctuation.
    Key,
    /// Literal values, arrays and inline tables.
    Value,
}

/// The four string forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringStyle {
    Basic,
    MultilineBasic,
    Literal,
    MultilineLiteral,
}

impl StringStyle {
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(self, StringStyle::MultilineBasic | StringStyle::MultilineLiteral)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    BareKey(&'a str),
    String {
        value: Cow<'a, str>,
        style: StringStyle,
    },
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Exact text of the datetime literal.
    Datetime(&'a str),
    Dot,
    Equals,
    Comma,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Newline,
    Comment(&'a str),
    Eof,
}

impl Token<'_> {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Token::BareKey(k) => format!("key `{}`", k),
            Token::String { .. } => "string".to_string(),
            Token::Integer(_) => "integer".to_string(),
            Token::Float(_) => "float".to_string(),
            Token::Boolean(_) => "boolean".to_string(),
            Token::Datetime(_) => "datetime".to_string(),
            Token::Dot => "`.`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::LeftBracket => "`[`".to_string(),
            Token::RightBracket => "`]`".to_string(),
            Token::LeftBrace => "`{`".to_string(),
            Token::RightBrace => "`}`".to_string(),
            Token::Newline => "newline".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its byte range in the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn error(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::parse(kind, self.input, offset)
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&self, mode: Mode) -> Result<Spanned<'a>> {
        self.clone().next_token(mode)
    }

    /// True if the next byte starts a token with no whitespace before it.
    #[must_use]
    pub fn next_is_adjacent(&self, byte: u8) -> bool {
        self.input.as_bytes().get(self.pos) == Some(&byte)
    }

    pub fn next_token(&mut self, mode: Mode) -> Result<Spanned<'a>> {
        self.skip_whitespace();
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        let Some(ch) = rest.chars().next() else {
            return Ok(Spanned {
                token: Token::Eof,
                start,
                end: start,
            });
        };

        let token = match ch {
            '\n' => self.punct(Token::Newline, 1),
            '\r' if rest.starts_with("\r\n") => self.punct(Token::Newline, 2),
            '#' => self.comment()?,
            '=' => self.punct(Token::Equals, 1),
            ',' => self.punct(Token::Comma, 1),
            '[' => self.punct(Token::LeftBracket, 1),
            ']' => self.punct(Token::RightBracket, 1),
            '{' => self.punct(Token::LeftBrace, 1),
            '}' => self.punct(Token::RightBrace, 1),
            '"' => self.basic_string()?,
            '\'' => self.literal_string()?,
            '.' if mode == Mode::Key => self.punct(Token::Dot, 1),
            c if mode == Mode::Key && is_bare_key_char(c) => {
                let len = rest.find(|c: char| !is_bare_key_char(c)).unwrap_or(rest.len());
                self.pos += len;
                Token::BareKey(&rest[..len])
            }
            c if mode == Mode::Value && is_scalar_char(c) => self.scalar()?,
            c if is_control(c) => {
                return Err(self.error(ErrorKind::InvalidCharacter(c), start));
            }
            c => {
                return Err(self.error(
                    ErrorKind::UnexpectedToken(format!("character {:?}", c)),
                    start,
                ));
            }
        };

        Ok(Spanned {
            token,
            start,
            end: self.pos,
        })
    }

    fn punct(&mut self, token: Token<'a>, len: usize) -> Token<'a> {
        self.pos += len;
        token
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input.as_bytes()[self.pos..];
        self.pos += rest
            .iter()
            .take_while(|b| **b == b' ' || **b == b'\t')
            .count();
    }

    fn comment(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            if c == '\n' || rest[i..].starts_with("\r\n") {
                end = i;
                break;
            }
            if is_control(c) && c != '\t' {
                return Err(self.error(ErrorKind::InvalidCharacter(c), start + i));
            }
        }
        self.pos += end;
        Ok(Token::Comment(&rest[1..end]))
    }

    /// Scans an unquoted value: boolean, number, special float or datetime.
    fn scalar(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let mut end = start + scalar_len(&input[start..]);

        // `1979-05-27 07:32:00`: a space may separate a full date from a time
        if datetime::is_full_date(&input[start..end]) {
            let after = &input.as_bytes()[end..];
            if after.len() >= 4
                && after[0] == b' '
                && after[1].is_ascii_digit()
                && after[2].is_ascii_digit()
                && after[3] == b':'
            {
                end += 1 + scalar_len(&input[end + 1..]);
            }
        }

        let text = &input[start..end];
        self.pos = end;

        let token = match text {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "inf" | "+inf" => Token::Float(f64::INFINITY),
            "-inf" => Token::Float(f64::NEG_INFINITY),
            "nan" | "+nan" => Token::Float(f64::NAN),
            "-nan" => Token::Float(-f64::NAN),
            _ if datetime::looks_like_datetime(text) => {
                if datetime::classify(text).is_none() {
                    return Err(self.error(ErrorKind::InvalidDatetime, start));
                }
                Token::Datetime(text)
            }
            _ => {
                if let Some(i) = parse_integer(text) {
                    Token::Integer(i)
                } else if let Some(f) = parse_float(text) {
                    Token::Float(f)
                } else if text.starts_with(|c: char| c.is_ascii_digit() || "+-.".contains(c)) {
                    return Err(self.error(ErrorKind::InvalidNumber, start));
                } else {
                    return Err(self.error(
                        ErrorKind::UnexpectedToken(format!("`{}`", text)),
                        start,
                    ));
                }
            }
        };
        Ok(token)
    }

    fn basic_string(&mut self) -> Result<Token<'a>> {
        let start = self.pos;
        let multiline = self.input[start..].starts_with("\"\"\"");
        self.pos += if multiline { 3 } else { 1 };
        if multiline {
            self.skip_leading_newline();
        }

        let mut out = String::new();
        loop {
            let at = self.pos;
            let Some(c) = self.input[at..].chars().next() else {
                return Err(self.error(ErrorKind::UnterminatedString, start));
            };
            match c {
                '"' if multiline => {
                    if self.close_multiline(b'"', &mut out)? {
                        break;
                    }
                }
                '"' => {
                    self.pos += 1;
                    break;
                }
                '\\' => {
                    if multiline && self.line_ending_backslash() {
                        continue;
                    }
                    self.escape(&mut out)?;
                }
                '\n' | '\r' if !multiline => {
                    return Err(self.error(ErrorKind::UnterminatedString, start));
                }
                _ => self.string_char(c, &mut out)?,
            }
        }

        let style = if multiline {
            StringStyle::MultilineBasic
        } else {
            StringStyle::Basic
        };
        Ok(Token::String {
            value: Cow::Owned(out),
            style,
        })
    }

    fn literal_string(&mut self) -> Result<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let multiline = input[start..].starts_with("'''");
        if !multiline {
            let body_start = start + 1;
            let rest = &input[body_start..];
            for (i, c) in rest.char_indices() {
                match c {
                    '\'' => {
                        self.pos = body_start + i + 1;
                        return Ok(Token::String {
                            value: Cow::Borrowed(&rest[..i]),
                            style: StringStyle::Literal,
                        });
                    }
                    '\n' | '\r' => break,
                    c if is_control(c) && c != '\t' => {
                        return Err(self.error(ErrorKind::InvalidCharacter(c), body_start + i));
                    }
                    _ => {}
                }
            }
            return Err(self.error(ErrorKind::UnterminatedString, start));
        }

        self.pos += 3;
        self.skip_leading_newline();
        let mut out = String::new();
        loop {
            let Some(c) = self.input[self.pos..].chars().next() else {
                return Err(self.error(ErrorKind::UnterminatedString, start));
            };
            if c == '\'' {
                if self.close_multiline(b'\'', &mut out)? {
                    break;
                }
            } else {
                self.string_char(c, &mut out)?;
            }
        }
        Ok(Token::String {
            value: Cow::Owned(out),
            style: StringStyle::MultilineLiteral,
        })
    }

    /// A newline right after the opening delimiter is not part of the string.
    fn skip_leading_newline(&mut self) {
        let rest = &self.input[self.pos..];
        if rest.starts_with('\n') {
            self.pos += 1;
        } else if rest.starts_with("\r\n") {
            self.pos += 2;
        }
    }

    /// Handles a run of quotes inside a multi-line string. Returns true when
    /// the run closes the string; up to two quotes before the closing three
    /// belong to the content.
    fn close_multiline(&mut self, quote: u8, out: &mut String) -> Result<bool> {
        let run = self.input.as_bytes()[self.pos..]
            .iter()
            .take_while(|b| **b == quote)
            .count();
        if run > 5 {
            return Err(self.error(
                ErrorKind::UnexpectedToken("too many quotes closing a string".to_string()),
                self.pos + 5,
            ));
        }
        let content = if run >= 3 { run - 3 } else { run };
        out.extend(std::iter::repeat(char::from(quote)).take(content));
        self.pos += run;
        Ok(run >= 3)
    }

    /// Copies one literal character of a string body, rejecting control
    /// characters other than tab and newlines.
    fn string_char(&mut self, c: char, out: &mut String) -> Result<()> {
        let rest = &self.input[self.pos..];
        if c == '\r' {
            if rest.starts_with("\r\n") {
                out.push_str("\r\n");
                self.pos += 2;
                return Ok(());
            }
            return Err(self.error(ErrorKind::InvalidCharacter(c), self.pos));
        }
        if is_control(c) && c != '\t' && c != '\n' {
            return Err(self.error(ErrorKind::InvalidCharacter(c), self.pos));
        }
        out.push(c);
        self.pos += c.len_utf8();
        Ok(())
    }

    /// A backslash followed by optional blanks and a newline trims all
    /// whitespace up to the next visible character.
    fn line_ending_backslash(&mut self) -> bool {
        let bytes = self.input.as_bytes();
        let mut at = self.pos + 1;
        while matches!(bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        let newline = match bytes.get(at) {
            Some(b'\n') => 1,
            Some(b'\r') if bytes.get(at + 1) == Some(&b'\n') => 2,
            _ => return false,
        };
        at += newline;
        while matches!(bytes.get(at), Some(b' ' | b'\t' | b'\n'))
            || (bytes.get(at) == Some(&b'\r') && bytes.get(at + 1) == Some(&b'\n'))
        {
            at += 1;
        }
        self.pos = at;
        true
    }

    fn escape(&mut self, out: &mut String) -> Result<()> {
        let at = self.pos;
        let Some(c) = self.input[at + 1..].chars().next() else {
            return Err(self.error(ErrorKind::UnterminatedString, at));
        };
        self.pos += 1 + c.len_utf8();
        let decoded = match c {
            'b' => '\u{0008}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{000C}',
            'r' => '\r',
            '"' => '"',
            '\\' => '\\',
            'u' => self.unicode_escape(4, at)?,
            'U' => self.unicode_escape(8, at)?,
            _ => return Err(self.error(ErrorKind::InvalidEscape, at)),
        };
        out.push(decoded);
        Ok(())
    }

    fn unicode_escape(&mut self, len: usize, at: usize) -> Result<char> {
        let input = self.input;
        let hex = input
            .get(self.pos..self.pos + len)
            .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error(ErrorKind::InvalidEscape, at))?;
        let ch = u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(ErrorKind::InvalidEscape, at))?;
        self.pos += len;
        Ok(ch)
    }
}

/// ASCII control characters, which TOML forbids raw in strings and comments.
fn is_control(c: char) -> bool {
    c <= '\u{1f}' || c == '\u{7f}'
}

pub(crate) fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_scalar_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.' | ':')
}

fn scalar_len(text: &str) -> usize {
    text.find(|c: char| !is_scalar_char(c)).unwrap_or(text.len())
}

/// Validates underscore placement and strips underscores from a digit run.
fn clean_digits(text: &str, radix: u32) -> Option<String> {
    if text.is_empty() || text.starts_with('_') || text.ends_with('_') || text.contains("__") {
        return None;
    }
    if !text.chars().all(|c| c == '_' || c.is_digit(radix)) {
        return None;
    }
    Some(text.replace('_', ""))
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.as_bytes().first() {
        Some(b'+') | Some(b'-') => text.split_at(1),
        _ => ("", text),
    }
}

/// Decimal, `0x`, `0o` and `0b` integers with `_` separators.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    let (sign, body) = split_sign(text);
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = body.strip_prefix(prefix) {
            if !sign.is_empty() {
                return None;
            }
            return i64::from_str_radix(&clean_digits(digits, radix)?, radix).ok();
        }
    }
    let digits = clean_digits(body, 10)?;
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    format!("{}{}", sign, digits).parse().ok()
}

/// Floats with a fractional part, an exponent, or both.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    let (sign, body) = split_sign(text);
    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (mantissa, None),
    };
    if frac_part.is_none() && exponent.is_none() {
        return None;
    }

    let int_digits = clean_digits(int_part, 10)?;
    if int_digits.len() > 1 && int_digits.starts_with('0') {
        return None;
    }
    let mut normalized = format!("{}{}", sign, int_digits);
    if let Some(frac) = frac_part {
        normalized.push('.');
        normalized.push_str(&clean_digits(frac, 10)?);
    }
    if let Some(exp) = exponent {
        let (exp_sign, exp_body) = split_sign(exp);
        normalized.push('e');
        normalized.push_str(exp_sign);
        normalized.push_str(&clean_digits(exp_body, 10)?);
    }
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(input: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let spanned = lexer.next_token(Mode::Value).unwrap();
            if spanned.token == Token::Eof {
                return tokens;
            }
            tokens.push(spanned.token);
        }
    }

    fn value_err(input: &str) -> ErrorKind {
        Lexer::new(input)
            .next_token(Mode::Value)
            .unwrap_err()
            .kind()
            .cloned()
            .unwrap()
    }

    fn string_value(input: &str) -> String {
        match Lexer::new(input).next_token(Mode::Value).unwrap().token {
            Token::String { value, .. } => value.into_owned(),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(parse_integer("+99"), Some(99));
        assert_eq!(parse_integer("-17"), Some(-17));
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0xDEAD_beef"), Some(0xdead_beef));
        assert_eq!(parse_integer("0o755"), Some(0o755));
        assert_eq!(parse_integer("0b1101"), Some(13));
        assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_integer("9223372036854775808"), None);
        assert_eq!(parse_integer("012"), None);
        assert_eq!(parse_integer("1__0"), None);
        assert_eq!(parse_integer("_1"), None);
        assert_eq!(parse_integer("+0x10"), None);
        assert_eq!(parse_integer("0x"), None);
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(parse_float("3.1415"), Some(3.1415));
        assert_eq!(parse_float("-0.01"), Some(-0.01));
        assert_eq!(parse_float("5e+22"), Some(5e22));
        assert_eq!(parse_float("1e06"), Some(1e6));
        assert_eq!(parse_float("-2E-2"), Some(-2e-2));
        assert_eq!(parse_float("6.626e-34"), Some(6.626e-34));
        assert_eq!(parse_float("224_617.445_991"), Some(224_617.445_991));
        assert_eq!(parse_float("1.e5"), None);
        assert_eq!(parse_float(".5"), None);
        assert_eq!(parse_float("01.5"), None);
        assert_eq!(parse_float("1.5_"), None);
        assert_eq!(parse_float("42"), None);
    }

    #[test]
    fn test_scalar_tokens() {
        assert_eq!(
            values("true false 42 1.5"),
            vec![
                Token::Boolean(true),
                Token::Boolean(false),
                Token::Integer(42),
                Token::Float(1.5),
            ]
        );
        assert_eq!(values("-inf"), vec![Token::Float(f64::NEG_INFINITY)]);
        match values("+nan").as_slice() {
            [Token::Float(f)] => assert!(f.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_datetime_with_space_separator() {
        assert_eq!(
            values("1979-05-27 07:32:00Z"),
            vec![Token::Datetime("1979-05-27 07:32:00Z")]
        );
        // a date followed by something that is not a time stays a date
        assert_eq!(
            values("1979-05-27 # note"),
            vec![Token::Datetime("1979-05-27"), Token::Comment(" note")]
        );
    }

    #[test]
    fn test_invalid_scalars() {
        assert_eq!(value_err("1979-02-30"), ErrorKind::InvalidDatetime);
        assert_eq!(value_err("0x_1"), ErrorKind::InvalidNumber);
        assert_eq!(value_err("1.2.3"), ErrorKind::InvalidNumber);
        assert!(matches!(value_err("yes"), ErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn test_key_mode_reads_bare_keys() {
        let mut lexer = Lexer::new("1979-05-27.b-c = 1");
        let tokens: Vec<_> = (0..4)
            .map(|_| lexer.next_token(Mode::Key).unwrap().token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::BareKey("1979-05-27"),
                Token::Dot,
                Token::BareKey("b-c"),
                Token::Equals,
            ]
        );
    }

    #[test]
    fn test_basic_string_escapes() {
        assert_eq!(
            string_value(r#""tab\there \"q\" \u00E9 \U0001F600""#),
            "tab\there \"q\" \u{e9} \u{1F600}"
        );
        assert_eq!(value_err(r#""bad \x escape""#), ErrorKind::InvalidEscape);
        assert_eq!(value_err(r#""\uD800""#), ErrorKind::InvalidEscape);
        assert_eq!(value_err("\"open"), ErrorKind::UnterminatedString);
        assert_eq!(value_err("\"line\nbreak\""), ErrorKind::UnterminatedString);
        assert_eq!(value_err("\"nul\u{0}\""), ErrorKind::InvalidCharacter('\0'));
    }

    #[test]
    fn test_multiline_basic_string() {
        assert_eq!(string_value("\"\"\"\nRoses\nViolets\"\"\""), "Roses\nViolets");
        assert_eq!(
            string_value("\"\"\"The quick \\\n\n   brown fox\"\"\""),
            "The quick brown fox"
        );
        assert_eq!(string_value("\"\"\"say \"\"hi\"\"\"\"\""), "say \"\"hi\"\"");
        assert_eq!(value_err("\"\"\"never closed"), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_literal_strings() {
        assert_eq!(string_value(r"'C:\Users\nodejs'"), r"C:\Users\nodejs");
        assert_eq!(
            string_value("'''\nfirst\n  second '' '''"),
            "first\n  second '' "
        );
        assert_eq!(value_err("'open\n'"), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_newlines_and_comments() {
        let mut lexer = Lexer::new("# c\r\n\n");
        assert_eq!(lexer.next_token(Mode::Key).unwrap().token, Token::Comment(" c"));
        assert_eq!(lexer.next_token(Mode::Key).unwrap().token, Token::Newline);
        assert_eq!(lexer.next_token(Mode::Key).unwrap().token, Token::Newline);
        assert_eq!(lexer.next_token(Mode::Key).unwrap().token, Token::Eof);

        let err = Lexer::new("\r").next_token(Mode::Key).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::InvalidCharacter('\r')));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let lexer = Lexer::new("= 1");
        assert_eq!(lexer.peek_token(Mode::Key).unwrap().token, Token::Equals);
        assert_eq!(lexer.position(), 0);
    }
}
