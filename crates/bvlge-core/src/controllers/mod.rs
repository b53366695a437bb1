//! Page controllers: the state and actions behind each route, independent of
//! how the page is drawn.

pub mod auth;
pub mod dashboard;
pub mod menu;
pub mod reports;

pub use auth::{LoginController, RegisterController, LOGIN_FAILED_NOTICE, REGISTER_FAILED_NOTICE};
pub use dashboard::{load_dashboard, DashboardController, DashboardData};
pub use menu::{sign_out, MenuAction, MenuController, MenuOption, LANDING_ACTIONS, PROFILE_MENU};
pub use reports::{
    MonthlyExpensePage, ReportPage, StatisticsPage, MONTHLY_EXPENSES_FAILED, STATISTICS_FAILED,
};

/// Lifecycle of a data page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// The guard sent the user elsewhere; nothing was fetched
    Redirected,
    Loading,
    Ready,
    Submitting,
    /// Load failed. Only a remount leaves this state.
    Error(String),
}
