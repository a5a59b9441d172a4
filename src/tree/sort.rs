//! Recursive Sorter
//!
//! Stateless ordering of a sibling group. The same spec is passed explicitly
//! at every tree depth; nothing is captured between calls.

use crate::error::ApiError;
use crate::store::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fields compared by parsed currency magnitude instead of text
pub const CURRENCY_FIELDS: &[&str] = &["balance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Map an ascending comparison onto this direction.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ApiError::InvalidCommand(format!(
                "Unknown sort direction: {} (must be 'asc' or 'desc')",
                s
            ))
        })
    }
}

/// Sort key and direction applied at every tree depth
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// No ordering: siblings keep their input order.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// Header-click cycling: the same key flips direction, a new key starts ascending.
    pub fn toggled(&self, key: &str) -> Self {
        if self.is_sorted_by(key) {
            Self::by(key, self.direction.reversed())
        } else {
            Self::by(key, SortDirection::Asc)
        }
    }
}

pub fn is_currency_field(key: &str) -> bool {
    CURRENCY_FIELDS.contains(&key)
}

/// Parse a currency-formatted string to its magnitude.
///
/// Everything except digits, `.` and `-` is stripped; the longest numeric
/// prefix of the remainder is parsed. Empty or unparsable input yields 0.
pub fn parse_currency(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    (1..=cleaned.len())
        .rev()
        .find_map(|end| cleaned[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn currency_value(value: FieldValue<'_>) -> f64 {
    match value {
        FieldValue::Number(n) => n,
        FieldValue::Int(n) => n as f64,
        FieldValue::Text(text) => parse_currency(text),
        FieldValue::Bool(_) | FieldValue::Missing => 0.0,
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
        (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(&b),
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Int(a), FieldValue::Number(b)) => {
            (a as f64).partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Number(a), FieldValue::Int(b)) => {
            a.partial_cmp(&(b as f64)).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Ascending comparison of two records on `key`.
pub fn compare_records(a: &Record, b: &Record, key: &str) -> Ordering {
    if is_currency_field(key) {
        let a = currency_value(a.field(key));
        let b = currency_value(b.field(key));
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    compare_values(a.field(key), b.field(key))
}

/// Return a new, stably ordered copy of `nodes`. Without a key the input order is kept.
pub fn sort_siblings<'a>(nodes: &[&'a Record], spec: &SortSpec) -> Vec<&'a Record> {
    let mut sorted = nodes.to_vec();
    if let Some(key) = spec.key.as_deref() {
        sorted.sort_by(|a, b| spec.direction.apply(compare_records(a, b, key)));
    }
    sorted
}
