//! Option lists for the landing page and the profile menu.

use tracing::{info, warn};

use crate::routes::{Navigator, Route, UNAUTHENTICATED_LANDING};
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Go(Route),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub title: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub const LANDING_ACTIONS: &[MenuOption] = &[
    MenuOption {
        title: "Sign in",
        description: "Already have an account",
        action: MenuAction::Go(Route::Login),
    },
    MenuOption {
        title: "Sign up",
        description: "Create a new account",
        action: MenuAction::Go(Route::Register),
    },
];

pub const PROFILE_MENU: &[MenuOption] = &[
    MenuOption {
        title: "Dashboard",
        description: "View your transactions and balance.",
        action: MenuAction::Go(Route::Dashboard),
    },
    MenuOption {
        title: "Statistics",
        description: "Summaries and financial analysis.",
        action: MenuAction::Go(Route::Statistics),
    },
    MenuOption {
        title: "Monthly Expenses",
        description: "Track expenses month by month.",
        action: MenuAction::Go(Route::MonthlyExpense),
    },
    MenuOption {
        title: "Sign out",
        description: "Forget the stored session.",
        action: MenuAction::SignOut,
    },
];

/// Selection over a fixed option list
#[derive(Debug, Clone)]
pub struct MenuController {
    options: &'static [MenuOption],
    selected: usize,
}

impl MenuController {
    pub fn new(options: &'static [MenuOption]) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    pub fn options(&self) -> &'static [MenuOption] {
        self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Run the selected option
    pub fn activate(&self, session: &SessionContext, navigator: &mut Navigator) {
        let Some(option) = self.options.get(self.selected) else {
            return;
        };
        match option.action {
            MenuAction::Go(route) => navigator.navigate(route),
            MenuAction::SignOut => sign_out(session, navigator),
        }
    }
}

/// Clear the stored session and return to the landing page
pub fn sign_out(session: &SessionContext, navigator: &mut Navigator) {
    match session.clear() {
        Ok(()) => info!("Signed out"),
        Err(e) => warn!(error = %e, "Failed to clear session on sign out"),
    }
    navigator.replace(UNAUTHENTICATED_LANDING);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenPair;

    #[test]
    fn test_profile_menu_routes() {
        let routes: Vec<MenuAction> = PROFILE_MENU.iter().map(|o| o.action).collect();
        assert_eq!(
            routes,
            vec![
                MenuAction::Go(Route::Dashboard),
                MenuAction::Go(Route::Statistics),
                MenuAction::Go(Route::MonthlyExpense),
                MenuAction::SignOut,
            ]
        );
    }

    #[test]
    fn test_activate_navigates() {
        let session = SessionContext::in_memory();
        let mut nav = Navigator::new(Route::Profile);
        let mut menu = MenuController::new(PROFILE_MENU);
        menu.select_next();
        menu.activate(&session, &mut nav);
        assert_eq!(nav.current(), Route::Statistics);
    }

    #[test]
    fn test_sign_out_clears_session() {
        let session = SessionContext::in_memory();
        session
            .store_tokens(&TokenPair {
                access: Some("A".to_string()),
                refresh: Some("R".to_string()),
            })
            .unwrap();
        let mut nav = Navigator::new(Route::Profile);
        let mut menu = MenuController::new(PROFILE_MENU);
        menu.select_prev();
        menu.activate(&session, &mut nav);
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert_eq!(nav.current(), Route::Landing);
    }

    #[test]
    fn test_landing_actions() {
        let session = SessionContext::in_memory();
        let mut nav = Navigator::new(Route::Landing);
        let mut menu = MenuController::new(LANDING_ACTIONS);
        menu.select_next();
        menu.activate(&session, &mut nav);
        assert_eq!(nav.current(), Route::Register);
    }
}
