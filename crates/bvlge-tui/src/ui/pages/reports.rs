use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use bvlge_core::controllers::ReportPage;
use bvlge_core::models::{CategoryExpenseRow, StatisticsSummary};
use bvlge_core::utils::{format_brl, format_year_month};

use crate::app::App;
use crate::ui::styles;

use super::form_lines;

pub fn render_statistics(frame: &mut Frame, app: &App, area: Rect) {
    let page = &app.statistics;
    let chunks = split(page, area);
    render_search(frame, page, chunks[0]);

    let Some(summary) = page.data() else {
        return;
    };
    let block = Block::default()
        .title(Span::styled(" Summary ", styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(summary_lines(summary)).block(block), chunks[1]);
}

fn summary_lines(summary: &StatisticsSummary) -> Vec<Line<'static>> {
    let row = |label: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {label:<26}"), styles::muted_style()),
            Span::styled(value, style),
        ])
    };
    vec![
        Line::from(""),
        row("Total income", format_brl(summary.total_income), styles::income_style()),
        row("Total expenses", format_brl(summary.total_expense), styles::expense_style()),
        row("Balance", format_brl(summary.balance), styles::balance_style(summary.balance)),
        Line::from(""),
        row(
            "Most frequent category",
            summary
                .most_frequent_category
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            styles::list_item_style(),
        ),
        row(
            "Transactions",
            summary.transaction_count.to_string(),
            styles::list_item_style(),
        ),
        row(
            "Average transaction",
            format_brl(summary.average_transaction),
            styles::list_item_style(),
        ),
    ]
}

pub fn render_monthly(frame: &mut Frame, app: &App, area: Rect) {
    let page = &app.monthly;
    let chunks = split(page, area);
    render_search(frame, page, chunks[0]);

    if page.rows().is_empty() {
        return;
    }

    let header = Row::new(
        ["Category", "Month", "Average", "Total", "Count"]
            .into_iter()
            .map(|h| Cell::from(h).style(styles::header_style())),
    )
    .bottom_margin(1);
    let rows: Vec<Row> = page.rows().iter().map(expense_row).collect();
    let widths = [
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(Span::styled(" Expenses by month ", styles::title_style()))
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );
    frame.render_widget(table, chunks[1]);
}

fn expense_row(row: &CategoryExpenseRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(row.category.clone()),
        Cell::from(format_year_month(&row.year_month)),
        Cell::from(format_brl(row.avg_expense)),
        Cell::from(format_brl(row.total_expense)),
        Cell::from(row.count.to_string()),
    ])
    .style(styles::list_item_style())
}

fn split<T>(page: &ReportPage<T>, area: Rect) -> std::rc::Rc<[Rect]> {
    let search_height = page.form.schema().len() as u16 + 5;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(search_height), Constraint::Min(4)])
        .split(area)
}

fn render_search<T>(frame: &mut Frame, page: &ReportPage<T>, area: Rect) {
    let mut lines = form_lines(&page.form, !page.is_loading());
    lines.push(Line::from(""));
    let footer = if page.is_loading() {
        Line::from(Span::styled("  Searching...", styles::muted_style()))
    } else if let Some(error) = &page.error {
        Line::from(Span::styled(format!("  {error}"), styles::error_style()))
    } else {
        Line::from(vec![
            Span::styled("  Enter", styles::help_key_style()),
            Span::styled(" to search. Blank dates are not sent.", styles::muted_style()),
        ])
    };
    lines.push(footer);

    let block = Block::default()
        .title(Span::styled(" Period ", styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
