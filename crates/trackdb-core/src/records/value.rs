//! Cell values before and after normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical text pattern for date/timestamp cells.
///
/// Test fixtures encode this pattern directly, so it must never change.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An un-normalized cell as handed over by a query layer or fixture loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// The field is missing from the source row.
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    /// Nested arrays/objects; these normalize to null.
    Compound(serde_json::Value),
}

impl From<bool> for Datum {
    fn from(v: bool) -> Self {
        Datum::Bool(v)
    }
}

impl From<&bool> for Datum {
    fn from(v: &bool) -> Self {
        Datum::Bool(*v)
    }
}

macro_rules! datum_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Datum {
            fn from(v: $t) -> Self {
                Datum::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! datum_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Datum {
            fn from(v: $t) -> Self {
                Datum::UInt(u64::from(v))
            }
        })*
    };
}

datum_from_signed!(i8, i16, i32, i64);
datum_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Datum {
    fn from(v: f32) -> Self {
        Datum::Float(f64::from(v))
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Float(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Text(v.to_string())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Text(v)
    }
}

impl From<&String> for Datum {
    fn from(v: &String) -> Self {
        Datum::Text(v.clone())
    }
}

impl From<NaiveDateTime> for Datum {
    fn from(v: NaiveDateTime) -> Self {
        Datum::DateTime(v)
    }
}

impl From<NaiveDate> for Datum {
    fn from(v: NaiveDate) -> Self {
        Datum::DateTime(v.and_time(chrono::NaiveTime::default()))
    }
}

/// Zoned instants keep the wall-clock time of their own offset.
impl<Tz: TimeZone> From<DateTime<Tz>> for Datum {
    fn from(v: DateTime<Tz>) -> Self {
        Datum::DateTime(v.naive_local())
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Self {
        v.map_or(Datum::Null, Into::into)
    }
}

impl From<serde_json::Value> for Datum {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Datum::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Datum::UInt(u)
                } else {
                    n.as_f64().map_or(Datum::Null, Datum::Float)
                }
            }
            Value::String(s) => Datum::Text(s),
            compound @ (Value::Array(_) | Value::Object(_)) => Datum::Compound(compound),
        }
    }
}

impl From<&serde_json::Value> for Datum {
    fn from(v: &serde_json::Value) -> Self {
        Datum::from(v.clone())
    }
}

/// A cell after normalization: the closed set of comparable forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Null,
    Boolean(bool),
    String(String),
}

impl NormalizedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, NormalizedValue::Null)
    }

    /// Text used for comparison: booleans compare by their literal text and
    /// nulls have none.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NormalizedValue::Null => None,
            NormalizedValue::Boolean(true) => Some("true"),
            NormalizedValue::Boolean(false) => Some("false"),
            NormalizedValue::String(s) => Some(s),
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text().unwrap_or("null"))
    }
}

impl From<&NormalizedValue> for Datum {
    fn from(v: &NormalizedValue) -> Self {
        match v {
            NormalizedValue::Null => Datum::Null,
            NormalizedValue::Boolean(b) => Datum::Bool(*b),
            NormalizedValue::String(s) => Datum::Text(s.clone()),
        }
    }
}

/// Text form of a float that matches how integral values are written.
pub(crate) fn float_text(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let sign = if v > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else {
        v.to_string()
    }
}
