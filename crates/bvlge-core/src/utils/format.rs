use chrono::NaiveDate;

/// Format a value as Brazilian reais: `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative && cents != "0.00" {
        format!("-R$ {grouped},{dec_part}")
    } else {
        format!("R$ {grouped},{dec_part}")
    }
}

/// Format a decimal string amount as it comes off the wire.
/// Unparseable input is shown unchanged.
pub fn format_amount(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format_brl(value),
        _ => amount.to_string(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Display form of a transaction date: `05/01/2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Display form of an API `YYYY-MM` bucket: `01/2024`
pub fn format_year_month(year_month: &str) -> String {
    match year_month.split_once('-') {
        Some((year, month)) if year.len() == 4 && month.len() == 2 => format!("{month}/{year}"),
        _ => year_month.to_string(),
    }
}
