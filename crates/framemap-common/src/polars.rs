//! Polars AnyValue utility functions.
//!
//! Source cells reach rule callbacks as text, so every cell read by the
//! engine passes through [`any_to_string`]. The numeric helpers back the
//! typed accessors on row views and values.

use std::borrow::Cow;
use std::str::FromStr;

use polars::prelude::AnyValue;

/// The handful of shapes a cell can take once Polars' dtypes are folded.
enum Scalar<'a> {
    Null,
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(Cow<'a, str>),
    Other(AnyValue<'a>),
}

impl<'a> Scalar<'a> {
    fn of(value: AnyValue<'a>) -> Self {
        match value {
            AnyValue::Null => Self::Null,
            AnyValue::Int8(v) => Self::Signed(i64::from(v)),
            AnyValue::Int16(v) => Self::Signed(i64::from(v)),
            AnyValue::Int32(v) => Self::Signed(i64::from(v)),
            AnyValue::Int64(v) => Self::Signed(v),
            AnyValue::UInt8(v) => Self::Unsigned(u64::from(v)),
            AnyValue::UInt16(v) => Self::Unsigned(u64::from(v)),
            AnyValue::UInt32(v) => Self::Unsigned(u64::from(v)),
            AnyValue::UInt64(v) => Self::Unsigned(v),
            AnyValue::Float32(v) => Self::Float(f64::from(v)),
            AnyValue::Float64(v) => Self::Float(v),
            AnyValue::Boolean(b) => Self::Bool(b),
            AnyValue::String(s) => Self::Text(Cow::Borrowed(s)),
            AnyValue::StringOwned(s) => Self::Text(Cow::Owned(s.to_string())),
            other => Self::Other(other),
        }
    }
}

/// Converts a Polars `AnyValue` to its `String` representation.
///
/// Returns an empty string for `Null` and formats floats without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use framemap_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match Scalar::of(value) {
        Scalar::Null => String::new(),
        Scalar::Signed(v) => v.to_string(),
        Scalar::Unsigned(v) => v.to_string(),
        Scalar::Float(v) => format_numeric(v),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Text(s) => s.into_owned(),
        Scalar::Other(other) => other.to_string(),
    }
}

/// Formats a float in its shortest round-trip form, so `1.0` becomes `"1"`
/// and `1.50` becomes `"1.5"`.
///
/// # Examples
///
/// ```
/// use framemap_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(10.0), "10");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    // `Display` for f64 never pads the fraction.
    v.to_string()
}

/// Reads a cell as `f64`. Text is parsed; null and non-numeric cells give `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match Scalar::of(value) {
        Scalar::Signed(v) => Some(v as f64),
        Scalar::Unsigned(v) => Some(v as f64),
        Scalar::Float(v) => Some(v),
        Scalar::Text(s) => parse_f64(&s),
        Scalar::Null | Scalar::Bool(_) | Scalar::Other(_) => None,
    }
}

/// Reads a cell as `i64`. Floats are truncated and text is parsed.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match Scalar::of(value) {
        Scalar::Signed(v) => Some(v),
        Scalar::Unsigned(v) => i64::try_from(v).ok(),
        Scalar::Float(v) => Some(v as i64),
        Scalar::Text(s) => parse_i64(&s),
        Scalar::Null | Scalar::Bool(_) | Scalar::Other(_) => None,
    }
}

fn parse_trimmed<T: FromStr>(value: &str) -> Option<T> {
    match value.trim() {
        "" => None,
        trimmed => trimmed.parse().ok(),
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    parse_trimmed(value)
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    parse_trimmed(value)
}
