//! Data models for the finance API.
//!
//! - `Transaction`, `NewTransaction`: ledger entries and the create payload
//! - `UserProfile`, `Credentials`, `Registration`, `TokenPair`: account types
//! - `StatisticsSummary`, `CategoryExpenseRow`, `DateRange`: aggregate reports

pub mod statistics;
pub mod transaction;
pub mod user;

pub use statistics::{CategoryExpenseRow, DateRange, StatisticsSummary, DATE_INPUT_FORMAT};
pub use transaction::{sort_newest_first, Category, NewTransaction, Transaction, TransactionKind};
pub use user::{Credentials, Registration, TokenPair, UserProfile};

use serde::de;

// Decimal fields arrive as strings ("12.50") or bare numbers depending on the
// serializer settings on the API side.
fn deserialize_decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct DecimalVisitor;

    impl<'de> de::Visitor<'de> for DecimalVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a decimal string or number")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(DecimalVisitor)
}

// Aggregates are numbers, numeric strings, or null when there is no data.
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LenientF64Visitor;

    impl<'de> de::Visitor<'de> for LenientF64Visitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, numeric string or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v as f64)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.trim().is_empty() {
                return Ok(0.0);
            }
            v.trim().parse().map_err(E::custom)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(LenientF64Visitor)
}
