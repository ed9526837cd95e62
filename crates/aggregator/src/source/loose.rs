//! Loosely-typed values found in distributor payloads.
//!
//! Some sources encode the same field as an integer, a float or a quoted
//! string depending on the row. [`LooseValue`] captures what was actually
//! sent and [`LooseValue::to_int`] is the single coercion applied to it.

use serde::{Deserialize, Serialize};

/// A JSON scalar whose type varies between responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for LooseValue {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl LooseValue {
    /// Coerce to an integer.
    ///
    /// Decimals are truncated, text is parsed as an integer and anything that
    /// does not parse becomes 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Self::Integer(v) => *v,
            Self::Decimal(v) => v.trunc() as i64,
            Self::Text(s) => s.parse::<i64>().unwrap_or(0),
            Self::Other(_) => 0,
        }
    }

    /// The numeric value, if the field was sent as a JSON number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Decimal(v) => Some(*v),
            Self::Text(_) | Self::Other(_) => None,
        }
    }
}
