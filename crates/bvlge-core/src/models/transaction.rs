use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction direction. The API spells losses as `Loss` or `expense`;
/// any other label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Loss,
    Other(String),
}

impl TransactionKind {
    pub fn label(&self) -> &str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Loss => "Loss",
            TransactionKind::Other(label) => label,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "income" => TransactionKind::Income,
            "loss" | "expense" => TransactionKind::Loss,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        TransactionKind::from(value.to_string())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Transaction category. Known names map onto variants (case-insensitive),
/// anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Salary,
    Food,
    Rent,
    Transport,
    Other,
    Custom(String),
}

impl Category {
    pub fn name(&self) -> &str {
        match self {
            Category::Salary => "Salary",
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Transport => "Transport",
            Category::Other => "Other",
            Category::Custom(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "salary" => Category::Salary,
            "food" => Category::Food,
            "rent" => Category::Rent,
            "transport" => Category::Transport,
            "other" => Category::Other,
            _ => Category::Custom(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            known => known.name().to_string(),
        }
    }
}

/// A recorded transaction as returned by `/api/transactions/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Decimal amount, kept as the string the API sent
    #[serde(deserialize_with = "super::deserialize_decimal_string")]
    pub amount: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub user: i64,
}

/// Payload for `POST /api/transactions/`. Values are sent as entered; the
/// API is responsible for validating them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Sort transactions newest first. The sort is stable, so records sharing a
/// date keep their relative order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
