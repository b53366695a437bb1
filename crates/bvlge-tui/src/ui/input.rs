//! Keyboard input handling for the TUI.
//!
//! Translates key events into page actions on `App`. Pages with forms send
//! printable keys to the focused field, so global single-letter shortcuts
//! only apply on pages without text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use bvlge_core::controllers::PageState;
use bvlge_core::forms::FormState;
use bvlge_core::routes::Route;

use crate::app::{App, AppState, DashboardFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    if key.code == KeyCode::F(1) {
        app.state = AppState::ShowingHelp;
        return false;
    }

    app.status_message = None;

    match app.route() {
        Route::Landing | Route::Profile => handle_menu_input(app, key),
        Route::Login => handle_login_input(app, key),
        Route::Register => handle_register_input(app, key),
        Route::Dashboard => handle_dashboard_input(app, key),
        Route::Statistics | Route::MonthlyExpense => handle_report_input(app, key),
    }
    false
}

/// Editing keys shared by every form. Returns true when the key was used.
fn edit_form(form: &mut FormState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.push_char(c);
        }
        _ => return false,
    }
    true
}

fn handle_menu_input(app: &mut App, key: KeyEvent) {
    let on_profile = app.route() == Route::Profile;
    let menu = if on_profile {
        &mut app.profile_menu
    } else {
        &mut app.landing
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => menu.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => menu.select_next(),
        KeyCode::Enter => app.activate_menu(),
        KeyCode::Esc if on_profile => app.go_back(Route::Dashboard),
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        _ => {}
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(Route::Landing),
        KeyCode::F(2) => app.go(Route::Register),
        KeyCode::Enter => app.submit_login(),
        _ if app.login.is_submitting() => {}
        _ => {
            edit_form(&mut app.login.form, key);
        }
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(Route::Landing),
        KeyCode::F(2) => app.go(Route::Login),
        KeyCode::Enter => app.submit_register(),
        _ if app.register.is_submitting() => {}
        _ => {
            edit_form(&mut app.register.form, key);
        }
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    match app.dashboard_focus {
        DashboardFocus::Table => match key.code {
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => app.dashboard.prev_page(),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => app.dashboard.next_page(),
            KeyCode::Home => app.dashboard.pager.first(),
            KeyCode::Char('a') | KeyCode::Tab if app.dashboard.state == PageState::Ready => {
                app.dashboard_focus = DashboardFocus::Form;
            }
            KeyCode::Char('m') | KeyCode::Esc => app.go(Route::Profile),
            KeyCode::Char('s') => app.go(Route::Statistics),
            KeyCode::Char('e') => app.go(Route::MonthlyExpense),
            KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
            _ => {}
        },
        DashboardFocus::Form => match key.code {
            KeyCode::Esc => app.dashboard_focus = DashboardFocus::Table,
            KeyCode::Enter => app.submit_transaction(),
            _ if app.dashboard.state == PageState::Submitting => {}
            _ => {
                app.dashboard.alert = None;
                edit_form(&mut app.dashboard.form, key);
            }
        },
    }
}

fn handle_report_input(app: &mut App, key: KeyEvent) {
    let statistics = app.route() == Route::Statistics;
    match key.code {
        KeyCode::Esc => app.go_back(Route::Profile),
        KeyCode::Enter if statistics => app.search_statistics(),
        KeyCode::Enter => app.search_monthly(),
        _ => {
            if statistics && !app.statistics.is_loading() {
                edit_form(&mut app.statistics.form, key);
            } else if !statistics && !app.monthly.is_loading() {
                edit_form(&mut app.monthly.form, key);
            }
        }
    }
}
