//! Cell values flowing through mapping rules.
//!
//! Source cells always enter the engine as [`Value::Text`] (string coercion
//! plus trimming). Constants are text as well. Callbacks are free to return
//! any variant, so a modification can turn `"3"` into `Value::Int(5)`.

use std::fmt;

use framemap_common::{format_numeric, parse_f64, parse_i64};

use crate::error::{Result, ValueError};

/// Sentinel for a source column that is absent from the row.
pub const NOT_SET: Value = Value::NotSet;

/// A single cell value in a result record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The source column was absent for this row.
    #[default]
    NotSet,
    /// Text value (all source cells and constants start here).
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl Value {
    /// Returns true for the [`NOT_SET`] sentinel.
    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::NotSet)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotSet => "not-set",
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }

    /// Borrow the text of a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Read the value as an integer. Text is parsed, floats are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(*v as i64),
            Self::Text(s) => parse_i64(s),
            _ => None,
        }
    }

    /// Read the value as a float. Text is parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => parse_f64(s),
            _ => None,
        }
    }

    /// Like [`Value::as_i64`] but fails with [`ValueError::NotInteger`].
    pub fn require_i64(&self) -> Result<i64> {
        self.as_i64().ok_or_else(|| ValueError::NotInteger {
            value: self.to_string(),
        })
    }

    /// Like [`Value::as_f64`] but fails with [`ValueError::NotNumeric`].
    pub fn require_f64(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| ValueError::NotNumeric {
            value: self.to_string(),
        })
    }

    /// Combine `self` (the stored value) with `incoming` for append-mode rules.
    ///
    /// Text concatenates, numbers add. Any other pairing is an error, the
    /// sentinel included.
    ///
    /// # Examples
    ///
    /// ```
    /// use framemap_model::Value;
    ///
    /// let joined = Value::from("Kate").try_append(&Value::from(", Willie")).unwrap();
    /// assert_eq!(joined, Value::from("Kate, Willie"));
    /// assert!(Value::from("x").try_append(&Value::Int(1)).is_err());
    /// ```
    pub fn try_append(&self, incoming: &Value) -> Result<Value> {
        match (self, incoming) {
            (Self::Text(existing), Self::Text(next)) => {
                let mut joined = String::with_capacity(existing.len() + next.len());
                joined.push_str(existing);
                joined.push_str(next);
                Ok(Self::Text(joined))
            }
            (Self::Int(existing), Self::Int(next)) => existing
                .checked_add(*next)
                .map(Self::Int)
                .ok_or(ValueError::Overflow {
                    existing: *existing,
                    incoming: *next,
                }),
            (Self::Int(existing), Self::Float(next)) => Ok(Self::Float(*existing as f64 + next)),
            (Self::Float(existing), Self::Int(next)) => Ok(Self::Float(existing + *next as f64)),
            (Self::Float(existing), Self::Float(next)) => Ok(Self::Float(existing + next)),
            _ => Err(ValueError::IncompatibleAppend {
                existing: self.kind(),
                incoming: incoming.kind(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSet => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
