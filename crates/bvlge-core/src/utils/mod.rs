//! Display formatting for money, dates and table cells.

pub mod format;

pub use format::{format_amount, format_brl, format_date, format_year_month, truncate_string};
