use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::form_lines;

pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from("")];
    lines.extend(form_lines(&app.login.form, !app.login.is_submitting()));
    lines.push(Line::from(""));
    lines.push(button_line("Sign in", app.login.is_submitting(), "Signing in..."));
    push_notice(&mut lines, app.login.notice.as_deref());
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  No account? ", styles::muted_style()),
        Span::styled("[F2]", styles::help_key_style()),
        Span::styled(" Sign up", styles::muted_style()),
    ]));

    render_box(frame, area, " Sign In ", lines, 60);
}

pub fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let register = &app.register;
    let mut lines = vec![Line::from("")];
    lines.extend(form_lines(&register.form, !register.is_submitting()));

    let confirm = register.form.value("password_confirm");
    if !confirm.is_empty() && !register.passwords_match() {
        lines.push(Line::from(Span::styled(
            "  Passwords do not match",
            styles::highlight_style(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(button_line("Create account", register.is_submitting(), "Creating account..."));
    push_notice(&mut lines, register.notice.as_deref());
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Have an account? ", styles::muted_style()),
        Span::styled("[F2]", styles::help_key_style()),
        Span::styled(" Sign in", styles::muted_style()),
    ]));

    render_box(frame, area, " Sign Up ", lines, 64);
}

fn button_line(label: &str, busy: bool, busy_label: &str) -> Line<'static> {
    if busy {
        Line::from(Span::styled(format!("  {busy_label}"), styles::muted_style()))
    } else {
        Line::from(vec![
            Span::raw("  ["),
            Span::styled(format!(" ▶ {label} ◀ "), styles::selected_style()),
            Span::raw("]  "),
            Span::styled("Enter", styles::help_key_style()),
        ])
    }
}

fn push_notice(lines: &mut Vec<Line<'static>>, notice: Option<&str>) {
    if let Some(notice) = notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {notice}"), styles::error_style())));
    }
}

fn render_box(frame: &mut Frame, area: Rect, title: &'static str, lines: Vec<Line<'static>>, width: u16) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(title, styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
