//! Record Store
//!
//! The dataset collaborator: parent-linked records and the read-only source
//! the pipeline pulls them from. The pipeline never copies or mutates records.

pub mod persistence;

use crate::tree::sort::parse_currency;
use crate::types::{RecordId, ROOT_PARENT};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use persistence::{load_records, FileRecordSource};

/// Account balance as supplied by the dataset: either a raw amount or a
/// currency-formatted string such as `"$1,234.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Balance {
    Amount(f64),
    Formatted(String),
}

impl Balance {
    /// Numeric magnitude, with formatting characters stripped.
    pub fn amount(&self) -> f64 {
        match self {
            Balance::Amount(value) => *value,
            Balance::Formatted(text) => parse_currency(text),
        }
    }
}

impl Default for Balance {
    fn default() -> Self {
        Balance::Formatted(String::new())
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::Amount(value) => write!(f, "{:.2}", value),
            Balance::Formatted(text) => f.write_str(text),
        }
    }
}

/// One parent-linked record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    /// `ROOT_PARENT` for structural roots
    #[serde(default)]
    pub parent_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub balance: Balance,
    /// Records without the flag are active
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Borrowed view of a single record field, used for comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int(u64),
    Number(f64),
    Text(&'a str),
    Bool(bool),
    /// Field name does not exist on the record
    Missing,
}

impl Record {
    /// Active record with empty email and balance.
    pub fn new(id: RecordId, parent_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            email: String::new(),
            balance: Balance::default(),
            is_active: default_active(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_balance(mut self, balance: impl Into<String>) -> Self {
        self.balance = Balance::Formatted(balance.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn is_structural_root(&self) -> bool {
        self.parent_id == ROOT_PARENT
    }

    /// Look up a field by its wire name (`parentId`) or snake_case alias.
    pub fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Int(self.id),
            "parentId" | "parent_id" => FieldValue::Int(self.parent_id),
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "balance" => match &self.balance {
                Balance::Amount(value) => FieldValue::Number(*value),
                Balance::Formatted(text) => FieldValue::Text(text),
            },
            "isActive" | "is_active" => FieldValue::Bool(self.is_active),
            _ => FieldValue::Missing,
        }
    }
}

/// Read-only supplier of the full raw record list
pub trait RecordSource {
    fn records(&self) -> &[Record];
}

impl RecordSource for Vec<Record> {
    fn records(&self) -> &[Record] {
        self
    }
}
