//! FILENAME: core/engine/src/value.rs
//! PURPOSE: Defines the typed cell value and column type used by every table.
//! CONTEXT: Values flow from the record source into tables, through the
//! expansion engine and out to record views. Every conversion between
//! representations lives here so numeric and date handling stays exhaustive.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text layout used when a date/time value is shown to the host.
pub const DISPLAY_DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Text layout used when a date/time value is stored as text (lossless).
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    DateTime,
}

impl ColumnType {
    /// Stable lowercase name, used by the persisted dataset format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::DateTime => "datetime",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ColumnType::String),
            "integer" => Some(ColumnType::Integer),
            "float" => Some(ColumnType::Float),
            "datetime" => Some(ColumnType::DateTime),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts to an integer the way the host's numeric conversion does:
    /// floats round half to even, text must hold a whole number.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => {
                let rounded = f.round_ties_even();
                if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64 {
                    Some(rounded as i64)
                } else {
                    None
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Null | Value::DateTime(_) => None,
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Null | Value::DateTime(_) => None,
        }
    }

    /// Invariant text form. Dates use the lossless ISO layout here;
    /// display formatting for views is `display_string`.
    pub fn invariant_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::DateTime(dt) => dt.format(ISO_DATETIME_FORMAT).to_string(),
        }
    }

    /// Text shown to the host for this value.
    pub fn display_string(&self) -> String {
        match self {
            Value::Float(f) => format_float_display(*f),
            Value::DateTime(dt) => dt.format(DISPLAY_DATETIME_FORMAT).to_string(),
            other => other.invariant_string(),
        }
    }

    /// Converts the value so it can be stored in a column of type `target`.
    /// Null stays null. Returns `None` when no sensible conversion exists.
    pub fn coerce_to(&self, target: ColumnType) -> Option<Value> {
        match (self, target) {
            (Value::Null, _) => Some(Value::Null),
            (_, ColumnType::String) => Some(Value::String(self.invariant_string())),
            (Value::Integer(_), ColumnType::Integer) => Some(self.clone()),
            (_, ColumnType::Integer) => self.to_i64().map(Value::Integer),
            (Value::DateTime(_), ColumnType::Float) => None,
            (_, ColumnType::Float) => self.to_f64().map(Value::Float),
            (Value::DateTime(_), ColumnType::DateTime) => Some(self.clone()),
            (Value::String(s), ColumnType::DateTime) => parse_datetime(s).map(Value::DateTime),
            (_, ColumnType::DateTime) => None,
        }
    }
}

/// Shortest round-trip decimal text, without a trailing `.0` for whole numbers.
pub fn format_float(f: f64) -> String {
    format!("{}", f)
}

/// Significant digits kept when a float is shown rather than stored.
pub const DISPLAY_FLOAT_DIGITS: usize = 15;

/// Display text for a float: rounded to 15 significant digits, trailing
/// zeros dropped. Hides binary noise such as `0.30000000000000004`.
pub fn format_float_display(f: f64) -> String {
    if !f.is_finite() {
        return format_float(f);
    }
    let rounded: f64 = format!("{:.*e}", DISPLAY_FLOAT_DIGITS - 1, f)
        .parse()
        .unwrap_or(f);
    // -0 shows as 0
    if rounded == 0.0 {
        return "0".to_string();
    }
    format_float(rounded)
}

/// Accepts the ISO layout written by `invariant_string` and the display layout.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, ISO_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DISPLAY_DATETIME_FORMAT))
        .ok()
}
