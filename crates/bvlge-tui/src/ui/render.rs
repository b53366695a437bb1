use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use bvlge_core::routes::Route;

use crate::app::{App, AppState, DashboardFocus};

use super::pages::{auth, dashboard, menu, reports};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Min(10),   // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_page(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let route = app.route();
    let left = format!("  Bvlge · {}", route.title());
    let right = format!("{}  [F1] Help ", route.path());

    let title_line = Line::from(vec![
        Span::styled(left.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(left.chars().count() + right.chars().count()),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    match app.route() {
        Route::Landing => menu::render_landing(frame, app, area),
        Route::Login => auth::render_login(frame, app, area),
        Route::Register => auth::render_register(frame, app, area),
        Route::Dashboard => dashboard::render(frame, app, area),
        Route::Statistics => reports::render_statistics(frame, app, area),
        Route::MonthlyExpense => reports::render_monthly(frame, app, area),
        Route::Profile => menu::render_profile(frame, app, area),
    }
}

/// Key hints for the status bar on the current page
fn shortcuts(app: &App) -> &'static str {
    match app.route() {
        Route::Landing => "↑/↓ select | Enter open | q quit",
        Route::Profile => "↑/↓ select | Enter open | Esc back | q quit",
        Route::Login | Route::Register => "Tab next field | Enter submit | Esc back",
        Route::Dashboard => match app.dashboard_focus {
            DashboardFocus::Table => "←/→ page | a add | m menu | s stats | q quit",
            DashboardFocus::Form => "Tab next field | Enter save | Esc list",
        },
        Route::Statistics | Route::MonthlyExpense => "Tab next field | Enter search | Esc back",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match &app.status_message {
        Some(msg) => format!(" {} ", msg),
        None if app.is_busy() => " Working... ".to_string(),
        None if app.session().is_authenticated() => " Signed in ".to_string(),
        None => " Not signed in ".to_string(),
    };
    let right_text = format!(" {} ", shortcuts(app));

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(status_line).style(styles::status_bar_style()), area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 22, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Bvlge", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("↑/↓", "Select menu option"),
        help_line("Enter", "Open option / submit form"),
        help_line("Esc", "Go back"),
        help_line("F2", "Switch between sign in and sign up"),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        help_line("Tab", "Next field"),
        help_line("Shift+Tab", "Previous field"),
        Line::from(""),
        Line::from(Span::styled(" Dashboard", styles::highlight_style())),
        help_line("←/→", "Previous/next page"),
        help_line("a", "Add a transaction"),
        help_line("m s e", "Menu, statistics, monthly expenses"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("F1", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 40, 10);
        let inner = centered_rect_fixed(60, 20, outer);
        assert_eq!(inner, Rect::new(0, 0, 40, 10));

        let inner = centered_rect_fixed(20, 4, outer);
        assert_eq!(inner, Rect::new(10, 3, 20, 4));
    }
}
