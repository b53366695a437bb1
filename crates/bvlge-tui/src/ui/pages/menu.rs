use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::menu_list;

/// Welcome page: sign in or sign up
pub fn render_landing(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(50, 14, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let heading = vec![
        Line::from(""),
        Line::from(Span::styled("  Welcome to Bvlge", styles::title_style())),
        Line::from(Span::styled(
            "  Track your income and expenses.",
            styles::muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(menu_list(&app.landing).block(block), chunks[1]);
}

/// Authenticated home menu
pub fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(56, 16, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let heading = vec![
        Line::from(""),
        Line::from(Span::styled("  Welcome to Bvlge", styles::title_style())),
        Line::from(Span::styled(
            "  Choose one of the options below to get started.",
            styles::muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(menu_list(&app.profile_menu).block(block), chunks[1]);
}
