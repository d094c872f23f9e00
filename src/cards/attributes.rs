//! Scalar card values.
//!
//! Card documents are flat mappings from field key to scalar. The engine
//! never interprets field keys directly; it goes through a `Card` view.
//!
//! ## Stat Types
//!
//! - `Null`: missing or explicitly empty
//! - `Bool`: flags (`_rotation_locked`)
//! - `Int`: whole numbers (atk, def, cost)
//! - `Float`: fractional numbers
//! - `Text`: names, types, classes

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// A scalar value stored on a card or carried by an event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Stat {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Stat::Null)
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Stat::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Stat::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading used by damage effects.
    ///
    /// Text holding a number is accepted since card editors store
    /// stats as strings.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Stat::Int(v) => Some(*v as f64),
            Stat::Float(v) => Some(*v),
            Stat::Text(s) => s.trim().parse::<f64>().ok(),
            Stat::Null | Stat::Bool(_) => None,
        }
    }

    /// Value equality where `Int` and `Float` compare numerically.
    #[must_use]
    pub fn same_value(&self, other: &Stat) -> bool {
        match (self, other) {
            (Stat::Int(a), Stat::Float(b)) | (Stat::Float(b), Stat::Int(a)) => *a as f64 == *b,
            _ => self == other,
        }
    }

    /// Truthiness of a flag field: null, false, zero and "" are false.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Stat::Null => false,
            Stat::Bool(b) => *b,
            Stat::Int(v) => *v != 0,
            Stat::Float(v) => *v != 0.0,
            Stat::Text(s) => !s.is_empty(),
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stat::Null => write!(f, "null"),
            Stat::Bool(v) => write!(f, "{}", v),
            Stat::Int(v) => write!(f, "{}", v),
            Stat::Float(v) => write!(f, "{}", v),
            Stat::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Stat {
    fn from(v: i64) -> Self {
        Stat::Int(v)
    }
}

impl From<i32> for Stat {
    fn from(v: i32) -> Self {
        Stat::Int(v as i64)
    }
}

impl From<usize> for Stat {
    fn from(v: usize) -> Self {
        Stat::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Stat {
    fn from(v: f64) -> Self {
        Stat::Float(v)
    }
}

impl From<bool> for Stat {
    fn from(v: bool) -> Self {
        Stat::Bool(v)
    }
}

impl From<String> for Stat {
    fn from(v: String) -> Self {
        Stat::Text(v)
    }
}

impl From<&str> for Stat {
    fn from(v: &str) -> Self {
        Stat::Text(v.to_string())
    }
}

impl<T: Into<Stat>> From<Option<T>> for Stat {
    fn from(v: Option<T>) -> Self {
        v.map_or(Stat::Null, Into::into)
    }
}

/// Raw card document: field key to scalar.
pub type CardRecord = OrdMap<String, Stat>;
