//! Numeric bounds, string lengths and array item counts
//!
//! Bounds keep integers and floats apart so that integer limits compare
//! exactly against integer instances. Integral floats inside the i64 range
//! are normalised to integers on construction, which makes `10`, `10.0` and
//! `1e1` the same limit in both notations.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

/// A single numeric limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    Int(i64),
    Float(f64),
}

impl Limit {
    /// Build a limit from a float, normalising integral values
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // 2^63 is not representable as i64, so the upper check is strict
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Some(Limit::Int(value as i64))
        } else {
            Some(Limit::Float(value))
        }
    }

    /// Build a limit from a JSON number
    pub fn from_number(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Limit::Int(i))
        } else {
            n.as_f64().and_then(Limit::from_f64)
        }
    }

    /// Convert back to a JSON value
    pub fn to_value(self) -> Value {
        match self {
            Limit::Int(i) => Value::from(i),
            Limit::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Limit::Int(i) => i as f64,
            Limit::Float(f) => f,
        }
    }

    /// Non-negative integer view, used for lengths and counts
    pub fn as_count(self) -> Option<u64> {
        match self {
            Limit::Int(i) if i >= 0 => Some(i as u64),
            _ => None,
        }
    }

    /// Compare two limits, exactly when both are integers
    pub fn compare(self, other: Limit) -> Option<Ordering> {
        match (self, other) {
            (Limit::Int(a), Limit::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    /// Compare a JSON number against this limit (`number` relative to `self`)
    pub fn compare_number(self, n: &Number) -> Option<Ordering> {
        match self {
            Limit::Int(limit) => {
                if let Some(i) = n.as_i64() {
                    Some(i.cmp(&limit))
                } else if n.is_u64() {
                    // only values above i64::MAX reach this branch
                    Some(Ordering::Greater)
                } else {
                    n.as_f64()?.partial_cmp(&(limit as f64))
                }
            }
            Limit::Float(limit) => n.as_f64()?.partial_cmp(&limit),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Int(i) => write!(f, "{}", i),
            // serde_json prints the shortest representation that round-trips
            Limit::Float(v) => match Number::from_f64(*v) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{}", v),
            },
        }
    }
}

/// One side of a numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: Limit,
    pub exclusive: bool,
}

impl Bound {
    pub fn inclusive(value: Limit) -> Self {
        Self {
            value,
            exclusive: false,
        }
    }

    pub fn exclusive(value: Limit) -> Self {
        Self {
            value,
            exclusive: true,
        }
    }
}

/// Range on `integer` and `number` nodes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericRange {
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

impl NumericRange {
    pub fn new(min: Option<Bound>, max: Option<Bound>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// True when no number can satisfy both bounds
    pub fn is_empty(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => match min.value.compare(max.value) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => min.exclusive || max.exclusive,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min.map_or(false, |b| b.exclusive) { '(' } else { '{' };
        let close = if self.max.map_or(false, |b| b.exclusive) { ')' } else { '}' };
        write!(f, "{}", open)?;
        if let Some(min) = self.min {
            write!(f, "{}", min.value)?;
        }
        write!(f, ",")?;
        if let Some(max) = self.max {
            write!(f, "{}", max.value)?;
        }
        write!(f, "{}", close)
    }
}

/// Inclusive range on string lengths and array item counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl LengthRange {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_empty(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

impl fmt::Display for LengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        if let Some(min) = self.min {
            write!(f, "{}", min)?;
        }
        write!(f, ",")?;
        if let Some(max) = self.max {
            write!(f, "{}", max)?;
        }
        write!(f, "}}")
    }
}

/// Rewrite integral floats inside a JSON value as integers
///
/// Used for enumerations and defaults so they print the way bounds do.
/// Integers outside the i64 range and fractional numbers are left alone.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match Limit::from_number(&n) {
            Some(Limit::Int(i)) => Value::from(i),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_value(value)))
                .collect(),
        ),
        other => other,
    }
}
