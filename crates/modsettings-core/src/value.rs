//! Scalar option values.
//!
//! Every user-configurable value in the subsystem is a scalar: a boolean,
//! a number, or a short string. Equality is structural, which is what the
//! change-detection in the settings service relies on.

use serde::{Deserialize, Serialize};

/// A scalar setting value.
///
/// The untagged encoding keeps the persisted record readable:
/// `{"trainyard": {"speed": 2.0, "signals": false}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A boolean toggle value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A free-form string value.
    Text(String),
}

impl OptionValue {
    /// Boolean view of the value, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// Non-numeric input coerces to `0.0` rather than failing; number
    /// controls normalize before clamping.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().unwrap_or(0.0),
            Self::Bool(_) => 0.0,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}
