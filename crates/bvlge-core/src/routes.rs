//! Client-side routes and navigation history.

use std::fmt;

use tracing::info;

/// The client's pages, one per route path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Statistics,
    MonthlyExpense,
    Profile,
}

/// Where a successful login lands
pub const AUTHENTICATED_LANDING: Route = Route::Dashboard;

/// Where the guard sends unauthenticated visitors
pub const UNAUTHENTICATED_LANDING: Route = Route::Landing;

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Statistics,
        Route::MonthlyExpense,
        Route::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Statistics => "/statistics",
            Route::MonthlyExpense => "/monthly-expense",
            Route::Profile => "/profile",
        }
    }

    /// Parse a path; a trailing slash is ignored
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether the route guard runs on mount
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Statistics | Route::MonthlyExpense | Route::Profile
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::Login => "Sign In",
            Route::Register => "Sign Up",
            Route::Dashboard => "Dashboard",
            Route::Statistics => "Statistics",
            Route::MonthlyExpense => "Monthly Expenses",
            Route::Profile => "Menu",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tracks the current route. Every navigation bumps a generation counter so
/// work started for an earlier page can tell it is no longer visible.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
    generation: u64,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
            generation: 0,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Go to `route`, remembering the current one
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.current, to = %route, "Navigate");
        self.history.push(self.current);
        self.current = route;
        self.generation += 1;
    }

    /// Go to `route` without a history entry (redirects)
    pub fn replace(&mut self, route: Route) {
        info!(from = %self.current, to = %route, "Redirect");
        self.current = route;
        self.generation += 1;
    }

    /// Return to the previous route, if any
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                self.generation += 1;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_guarded_routes() {
        assert!(!Route::Landing.requires_auth());
        assert!(!Route::Login.requires_auth());
        assert!(!Route::Register.requires_auth());
        assert!(Route::Dashboard.requires_auth());
        assert!(Route::Statistics.requires_auth());
        assert!(Route::MonthlyExpense.requires_auth());
        assert!(Route::Profile.requires_auth());
    }

    #[test]
    fn test_navigator_history_and_generation() {
        let mut nav = Navigator::default();
        assert_eq!(nav.generation(), 0);

        nav.navigate(Route::Login);
        nav.navigate(Route::Dashboard);
        assert_eq!(nav.current(), Route::Dashboard);
        assert_eq!(nav.generation(), 2);

        assert!(nav.back());
        assert_eq!(nav.current(), Route::Login);

        nav.replace(Route::Landing);
        assert_eq!(nav.current(), Route::Landing);
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Landing);
        assert!(!nav.back());
        assert_eq!(nav.generation(), 5);
    }
}
