//! Per-route page rendering.

pub mod auth;
pub mod dashboard;
pub mod menu;
pub mod reports;

use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use bvlge_core::controllers::MenuController;
use bvlge_core::forms::{FieldKind, FormState};
use bvlge_core::utils::truncate_string;

use super::styles;

/// Width of the value column in form rows
const FIELD_WIDTH: usize = 28;

/// Form fields as `Label: [value]` lines. The focused field shows a cursor
/// when `active`.
pub fn form_lines(form: &FormState, active: bool) -> Vec<Line<'static>> {
    let label_width = form
        .schema()
        .iter()
        .map(|field| field.label.len())
        .max()
        .unwrap_or(0);

    form.fields()
        .enumerate()
        .map(|(i, (field, value))| {
            let focused = active && i == form.focus();
            let shown = match field.kind {
                FieldKind::Secret => "*".repeat(value.chars().count().min(FIELD_WIDTH)),
                FieldKind::Text | FieldKind::Date => tail(value, FIELD_WIDTH),
            };
            let placeholder = match (field.kind, value.is_empty()) {
                (FieldKind::Date, true) if !focused => "YYYY-MM-DD".to_string(),
                _ => String::new(),
            };
            let cursor = if focused { "▌" } else { "" };
            let value_style = if focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let label_style = if field.required {
                styles::muted_style()
            } else {
                styles::muted_style().add_modifier(Modifier::ITALIC)
            };

            Line::from(vec![
                Span::styled(format!("  {:>width$}: [", field.label, width = label_width), label_style),
                Span::styled(format!("{shown}{cursor}"), value_style),
                Span::styled(placeholder, styles::muted_style()),
                Span::styled("]", styles::muted_style()),
            ])
        })
        .collect()
}

/// Last `max` characters of a value, so the cursor end stays visible
fn tail(value: &str, max: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(max)).collect()
}

/// Selectable option list with descriptions
pub fn menu_list(menu: &MenuController) -> List<'static> {
    let items: Vec<ListItem> = menu
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = i == menu.selected();
            let marker = if selected { "▶ " } else { "  " };
            let title_style = if selected {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, styles::highlight_style()),
                    Span::styled(option.title, title_style),
                ]),
                Line::from(Span::styled(
                    format!("    {}", truncate_string(option.description, 60)),
                    styles::muted_style(),
                )),
            ])
        })
        .collect();
    List::new(items)
}
