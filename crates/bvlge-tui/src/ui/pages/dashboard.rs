use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use bvlge_core::controllers::{DashboardController, PageState};
use bvlge_core::models::Transaction;
use bvlge_core::utils::{format_amount, format_date, truncate_string};

use crate::app::{App, DashboardFocus};
use crate::ui::styles;

use super::form_lines;

/// Maximum description width in the table
const DESCRIPTION_WIDTH: usize = 32;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let page = &app.dashboard;
    match &page.state {
        PageState::Redirected => {}
        PageState::Loading => render_message(frame, area, "Loading your transactions...", false),
        PageState::Error(message) => render_message(frame, area, message, true),
        PageState::Ready | PageState::Submitting => render_ready(frame, app, page, area),
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, is_error: bool) {
    let style = if is_error {
        styles::error_style()
    } else {
        styles::muted_style()
    };
    let lines = vec![Line::from(""), Line::from(Span::styled(format!("  {message}"), style))];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_ready(frame: &mut Frame, app: &App, page: &DashboardController, area: Rect) {
    let form_height = page.form.schema().len() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // Greeting
            Constraint::Min(6),              // Transactions
            Constraint::Length(form_height), // New transaction
        ])
        .split(area);

    let greeting = match &page.profile {
        Some(profile) => Line::from(vec![
            Span::styled(format!("  Hello, {}", profile.display_name()), styles::title_style()),
            Span::styled(format!("  <{}>", profile.email), styles::muted_style()),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(greeting), chunks[0]);

    render_table(frame, app, page, chunks[1]);
    render_form(frame, app, page, chunks[2]);
}

fn render_table(frame: &mut Frame, app: &App, page: &DashboardController, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Table;
    let header = Row::new(
        ["Date", "Description", "Category", "Type", "Amount"]
            .into_iter()
            .map(|h| Cell::from(h).style(styles::header_style())),
    )
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = page.page_items().iter().map(transaction_row).collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(16),
    ];

    let title = format!(
        " Transactions ({})  page {}/{} ",
        page.transactions().len(),
        page.pager.page() + 1,
        page.page_count()
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(Span::styled(title, styles::title_style()))
            .borders(Borders::ALL)
            .border_style(styles::border_style(focused)),
    );
    frame.render_widget(table, area);
}

fn transaction_row(transaction: &Transaction) -> Row<'static> {
    Row::new(vec![
        Cell::from(format_date(transaction.date)),
        Cell::from(truncate_string(&transaction.description, DESCRIPTION_WIDTH)),
        Cell::from(transaction.category.name().to_string()),
        Cell::from(transaction.kind.label().to_string()),
        Cell::from(format_amount(&transaction.amount)).style(styles::kind_style(&transaction.kind)),
    ])
    .style(styles::list_item_style())
}

fn render_form(frame: &mut Frame, app: &App, page: &DashboardController, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Form;
    let submitting = page.state == PageState::Submitting;

    let mut lines = form_lines(&page.form, focused && !submitting);
    let footer = if submitting {
        Line::from(Span::styled("  Saving...", styles::muted_style()))
    } else if let Some(alert) = &page.alert {
        Line::from(Span::styled(format!("  {alert}"), styles::error_style()))
    } else if focused {
        Line::from(Span::styled(
            "  Enter to save, Esc to return to the list",
            styles::muted_style(),
        ))
    } else {
        Line::from(Span::styled("  Press [a] to add a transaction", styles::muted_style()))
    };
    lines.push(Line::from(""));
    lines.push(footer);

    let block = Block::default()
        .title(Span::styled(" New transaction ", styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
