//! Datetime literals.
//!
//! TOML has four datetime forms: offset date-time, local date-time, local
//! date and local time. A [`Datetime`] keeps the literal exactly as written;
//! the calendar fields are only inspected to reject impossible dates such as
//! `2023-02-30`.

use crate::{Error, ErrorKind, Result};
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// The literal text of a TOML datetime.
///
/// A `Datetime` can only be built from a valid literal, so the serializer
/// can always write it back verbatim.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{Datetime, DatetimeForm};
///
/// let dt = Datetime::parse("1979-05-27T07:32:00-08:00").unwrap();
/// assert_eq!(dt.as_str(), "1979-05-27T07:32:00-08:00");
/// assert_eq!(dt.form(), DatetimeForm::OffsetDateTime);
///
/// assert!(Datetime::parse("1979-13-01").is_err());
/// assert!(Datetime::parse("1979-05-27 # comment").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Datetime {
    text: String,
    form: DatetimeForm,
}

/// Which of the four TOML datetime forms a literal uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatetimeForm {
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
}

impl Datetime {
    /// Validates `text` as one of the four datetime forms.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDatetime`] if the text is not exactly a
    /// datetime literal or names an impossible date or time.
    pub fn parse(text: &str) -> Result<Self> {
        match classify(text) {
            Some(form) => Ok(Datetime {
                text: text.to_string(),
                form,
            }),
            None => Err(Error::parse(ErrorKind::InvalidDatetime, text, 0)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn form(&self) -> DatetimeForm {
        self.form
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Datetime> for String {
    fn from(dt: Datetime) -> Self {
        dt.text
    }
}

/// True if `text` starts the way a datetime literal does (`dddd-` or `dd:`).
pub(crate) fn looks_like_datetime(text: &str) -> bool {
    let b = text.as_bytes();
    let digits = |n: usize| b.len() > n && b[..n].iter().all(u8::is_ascii_digit);
    (digits(4) && b[4] == b'-') || (digits(2) && b[2] == b':')
}

/// True if `text` is exactly a full date `YYYY-MM-DD`, the only prefix after
/// which a space may separate the date from a time.
pub(crate) fn is_full_date(text: &str) -> bool {
    date(text.as_bytes(), 0) == Some(10) && text.len() == 10
}

/// Returns the form of `text` if the whole string is a valid literal.
pub(crate) fn classify(text: &str) -> Option<DatetimeForm> {
    let b = text.as_bytes();
    if let Some(end) = time(b, 0) {
        return (end == b.len()).then_some(DatetimeForm::LocalTime);
    }
    let end = date(b, 0)?;
    if end == b.len() {
        return Some(DatetimeForm::LocalDate);
    }
    if !matches!(b[end], b'T' | b't' | b' ') {
        return None;
    }
    let end = time(b, end + 1)?;
    if end == b.len() {
        return Some(DatetimeForm::LocalDateTime);
    }
    let end = offset(b, end)?;
    (end == b.len()).then_some(DatetimeForm::OffsetDateTime)
}

fn digits(b: &[u8], at: usize, n: usize) -> Option<u32> {
    let run = b.get(at..at + n)?;
    if !run.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(run.iter().fold(0, |acc, d| acc * 10 + u32::from(d - b'0')))
}

fn expect(b: &[u8], at: usize, byte: u8) -> Option<()> {
    (b.get(at) == Some(&byte)).then_some(())
}

fn date(b: &[u8], at: usize) -> Option<usize> {
    let year = digits(b, at, 4)?;
    expect(b, at + 4, b'-')?;
    let month = digits(b, at + 5, 2)?;
    expect(b, at + 7, b'-')?;
    let day = digits(b, at + 8, 2)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)?;
    Some(at + 10)
}

fn time(b: &[u8], at: usize) -> Option<usize> {
    let hour = digits(b, at, 2)?;
    expect(b, at + 2, b':')?;
    let minute = digits(b, at + 3, 2)?;
    expect(b, at + 5, b':')?;
    let second = digits(b, at + 6, 2)?;
    // 60 is a leap second
    if second > 60 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second.min(59))?;
    let mut end = at + 8;
    if b.get(end) == Some(&b'.') {
        let frac = b[end + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
        if frac == 0 {
            return None;
        }
        end += 1 + frac;
    }
    Some(end)
}

fn offset(b: &[u8], at: usize) -> Option<usize> {
    match b.get(at)? {
        b'Z' | b'z' => Some(at + 1),
        b'+' | b'-' => {
            let hour = digits(b, at + 1, 2)?;
            expect(b, at + 3, b':')?;
            let minute = digits(b, at + 4, 2)?;
            (hour <= 23 && minute <= 59).then_some(at + 6)
        }
        _ => None,
    }
}
