use ratatui::style::{Color, Modifier, Style};

use bvlge_core::models::TransactionKind;

// Palette
pub const BRAND: Color = Color::Rgb(56, 142, 128);
pub const INCOME: Color = Color::Rgb(102, 178, 102);
pub const EXPENSE: Color = Color::Rgb(204, 92, 80);
pub const GOLD: Color = Color::Rgb(210, 170, 72);
pub const GREY: Color = Color::Rgb(124, 124, 132);
pub const ROW_SELECTED: Color = Color::Rgb(40, 56, 56);
pub const BAR: Color = Color::Rgb(28, 36, 36);
pub const TEXT: Color = Color::Rgb(224, 224, 224);

pub fn title_style() -> Style {
    Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(ROW_SELECTED).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted_style() -> Style {
    Style::default().fg(GREY)
}

pub fn highlight_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn income_style() -> Style {
    Style::default().fg(INCOME)
}

pub fn expense_style() -> Style {
    Style::default().fg(EXPENSE)
}

/// Failure notices, alerts and page errors
pub fn error_style() -> Style {
    Style::default().fg(EXPENSE).add_modifier(Modifier::BOLD)
}

/// Amount color for a transaction row
pub fn kind_style(kind: &TransactionKind) -> Style {
    match kind {
        TransactionKind::Income => income_style(),
        TransactionKind::Loss => expense_style(),
        TransactionKind::Other(_) => list_item_style(),
    }
}

/// Green when the balance is zero or positive, red otherwise
pub fn balance_style(balance: f64) -> Style {
    if balance < 0.0 {
        expense_style()
    } else {
        income_style()
    }
}

pub fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { BRAND } else { GREY })
}

pub fn header_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(BAR).fg(TEXT)
}

pub fn help_key_style() -> Style {
    header_style()
}

pub fn help_desc_style() -> Style {
    list_item_style()
}
