use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deserialize_lenient_f64;

/// Aggregate figures from `/api/statistics/`. Wire names are the API's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    #[serde(rename = "total_receitas", default, deserialize_with = "deserialize_lenient_f64")]
    pub total_income: f64,
    #[serde(rename = "total_despesas", default, deserialize_with = "deserialize_lenient_f64")]
    pub total_expense: f64,
    #[serde(rename = "saldo", default, deserialize_with = "deserialize_lenient_f64")]
    pub balance: f64,
    #[serde(rename = "categoria_mais_frequente", default)]
    pub most_frequent_category: Option<String>,
    #[serde(rename = "total_transacoes", default)]
    pub transaction_count: u64,
    #[serde(rename = "media_transacao", default, deserialize_with = "deserialize_lenient_f64")]
    pub average_transaction: f64,
}

/// One row of `/api/statistics/category-expenses/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpenseRow {
    pub category: String,
    pub year_month: String,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub avg_expense: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub total_expense: f64,
    #[serde(default)]
    pub count: u64,
}

/// Optional date bounds for the statistics endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Date format accepted in range inputs
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

impl DateRange {
    /// Parse two user-entered bounds. Blank input means "no bound".
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        Ok(Self {
            start: parse_bound(start, "start date")?,
            end: parse_bound(end, "end date")?,
        })
    }

    /// Query pairs to append to a request; absent bounds are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("start_date", start.format(DATE_INPUT_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end_date", end.format(DATE_INPUT_FORMAT).to_string()));
        }
        pairs
    }
}

fn parse_bound(input: &str, label: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| format!("Invalid {label}: use YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_wire_names() {
        let json = r#"{
            "total_receitas": 5000.0,
            "total_despesas": "1250.75",
            "saldo": 3749.25,
            "categoria_mais_frequente": "Food",
            "total_transacoes": 12,
            "media_transacao": 520.5
        }"#;
        let summary: StatisticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expense, 1250.75);
        assert_eq!(summary.most_frequent_category.as_deref(), Some("Food"));
        assert_eq!(summary.transaction_count, 12);
    }

    #[test]
    fn test_parse_category_expense_row() {
        let json = r#"[{"category": "Rent", "year_month": "2024-01", "avg_expense": 1200, "total_expense": 1200, "count": 1}]"#;
        let rows: Vec<CategoryExpenseRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].avg_expense, 1200.0);
    }

    #[test]
    fn test_date_range_blank_bounds_are_omitted() {
        let range = DateRange::parse("", "  ").unwrap();
        assert!(range.query_pairs().is_empty());

        let range = DateRange::parse("2024-01-01", "").unwrap();
        assert_eq!(range.query_pairs(), vec![("start_date", "2024-01-01".to_string())]);
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        let err = DateRange::parse("01/02/2024", "").unwrap_err();
        assert!(err.contains("start date"));
    }
}
