//! Application state management for the bvlge terminal client.
//!
//! `App` owns the navigator, one controller per page and the channel that
//! background requests report back on. Network calls never run on the UI
//! loop: each one is spawned as a `PageTask` tagged with the navigator
//! generation, and results for a page that is no longer mounted are dropped.

use std::future::Future;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bvlge_core::api::{ApiClient, ApiError};
use bvlge_core::config::Config;
use bvlge_core::controllers::{
    load_dashboard, DashboardController, DashboardData, LoginController, MenuController,
    MonthlyExpensePage, PageState, RegisterController, StatisticsPage, LANDING_ACTIONS,
    PROFILE_MENU,
};
use bvlge_core::guard::RouteGuard;
use bvlge_core::models::{CategoryExpenseRow, StatisticsSummary, TokenPair, Transaction, UserProfile};
use bvlge_core::routes::{Navigator, Route};
use bvlge_core::session::SessionContext;
use bvlge_core::task::{PageTask, Tagged};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the page result channel.
/// A page has at most one request in flight, so a handful is plenty.
const CHANNEL_BUFFER_SIZE: usize = 8;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Which half of the dashboard receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Table,
    Form,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Responses sent back from page tasks. Each variant carries the API result
/// for one kind of request.
enum PageResult {
    Login(Result<TokenPair, ApiError>),
    Register(Result<UserProfile, ApiError>),
    Dashboard(Result<DashboardData, ApiError>),
    Created(Result<Transaction, ApiError>),
    Statistics(Result<StatisticsSummary, ApiError>),
    MonthlyExpenses(Result<Vec<CategoryExpenseRow>, ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub api: ApiClient,
    pub guard: RouteGuard,
    pub navigator: Navigator,

    // UI State
    pub state: AppState,
    pub dashboard_focus: DashboardFocus,

    // Pages
    pub landing: MenuController,
    pub login: LoginController,
    pub register: RegisterController,
    pub dashboard: DashboardController,
    pub statistics: StatisticsPage,
    pub monthly: MonthlyExpensePage,
    pub profile_menu: MenuController,

    /// Navigator generation of the mounted page
    mounted: Option<u64>,
    /// In-flight request of the mounted page
    task: Option<PageTask>,
    result_tx: mpsc::Sender<Tagged<PageResult>>,
    result_rx: mpsc::Receiver<Tagged<PageResult>>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create the app with the configured session backend
    pub fn new(config: Config, start: Route) -> Result<Self> {
        let session = SessionContext::new(config.session_store()?);
        Self::with_session(config, session, start)
    }

    pub fn with_session(config: Config, session: SessionContext, start: Route) -> Result<Self> {
        debug!(api = %config.api_base_url(), backend = ?config.session_backend, "App starting");
        let api = ApiClient::from_config(&config, session.clone())?;
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let page_size = config.page_size();

        Ok(Self {
            config,
            api,
            guard: RouteGuard::new(session),
            navigator: Navigator::new(start),

            state: AppState::Normal,
            dashboard_focus: DashboardFocus::Table,

            landing: MenuController::new(LANDING_ACTIONS),
            login: LoginController::new(),
            register: RegisterController::new(),
            dashboard: DashboardController::new(page_size),
            statistics: StatisticsPage::new(),
            monthly: MonthlyExpensePage::new(),
            profile_menu: MenuController::new(PROFILE_MENU),

            mounted: None,
            task: None,
            result_tx: tx,
            result_rx: rx,

            status_message: None,
        })
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    /// Whether a request for the mounted page is still running
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Mount the navigator's current page if it changed since the last call.
    /// Redirects from the guard are followed until a page sticks.
    pub fn sync_route(&mut self) {
        while self.mounted != Some(self.navigator.generation()) {
            self.mount_current();
        }
    }

    pub fn go(&mut self, route: Route) {
        self.navigator.navigate(route);
        self.sync_route();
    }

    /// Go back one page, falling back to `fallback` with empty history
    pub fn go_back(&mut self, fallback: Route) {
        if !self.navigator.back() {
            self.navigator.navigate(fallback);
        }
        self.sync_route();
    }

    fn mount_current(&mut self) {
        // Dropping the handle aborts whatever the previous page started
        self.task = None;
        self.mounted = Some(self.navigator.generation());
        let route = self.navigator.current();
        debug!(%route, generation = self.navigator.generation(), "Mounting page");

        match route {
            Route::Landing => self.landing = MenuController::new(LANDING_ACTIONS),
            Route::Login => {
                let email = self.config.last_email.clone().unwrap_or_default();
                self.login = LoginController::new().with_email(&email);
            }
            Route::Register => self.register = RegisterController::new(),
            Route::Dashboard => {
                self.dashboard = DashboardController::new(self.config.page_size());
                self.dashboard_focus = DashboardFocus::Table;
                if self.dashboard.mount(&self.guard, &mut self.navigator) {
                    let api = self.api.clone();
                    self.spawn(async move { PageResult::Dashboard(load_dashboard(&api).await) });
                }
            }
            Route::Statistics => {
                self.statistics = StatisticsPage::new();
                self.statistics.mount(&self.guard, &mut self.navigator);
            }
            Route::MonthlyExpense => {
                self.monthly = MonthlyExpensePage::new();
                self.monthly.mount(&self.guard, &mut self.navigator);
            }
            Route::Profile => {
                self.profile_menu = MenuController::new(PROFILE_MENU);
                self.guard.enter(&mut self.navigator);
            }
        }
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = PageResult> + Send + 'static,
    {
        let generation = self.navigator.generation();
        self.task = Some(PageTask::spawn(generation, self.result_tx.clone(), work));
    }

    // =========================================================================
    // Page Actions
    // =========================================================================

    pub fn submit_login(&mut self) {
        if let Some(credentials) = self.login.begin_submit() {
            let api = self.api.clone();
            self.spawn(async move { PageResult::Login(api.login(&credentials).await) });
        }
    }

    pub fn submit_register(&mut self) {
        if let Some(registration) = self.register.begin_submit(self.api.session()) {
            let api = self.api.clone();
            self.spawn(async move { PageResult::Register(api.register(&registration).await) });
        }
    }

    pub fn submit_transaction(&mut self) {
        if let Some(payload) = self.dashboard.begin_submit() {
            let api = self.api.clone();
            self.spawn(async move { PageResult::Created(api.create_transaction(&payload).await) });
        }
    }

    pub fn search_statistics(&mut self) {
        if let Some(range) = self.statistics.begin_search() {
            let api = self.api.clone();
            self.spawn(async move { PageResult::Statistics(api.statistics(&range).await) });
        }
    }

    pub fn search_monthly(&mut self) {
        if let Some(range) = self.monthly.begin_search() {
            let api = self.api.clone();
            self.spawn(async move {
                PageResult::MonthlyExpenses(api.category_expenses(&range).await)
            });
        }
    }

    /// Run the selected entry of the landing page or the profile menu
    pub fn activate_menu(&mut self) {
        let session = self.api.session().clone();
        match self.navigator.current() {
            Route::Landing => self.landing.activate(&session, &mut self.navigator),
            Route::Profile => {
                let was_authenticated = session.is_authenticated();
                self.profile_menu.activate(&session, &mut self.navigator);
                if was_authenticated && !session.is_authenticated() {
                    self.status_message = Some("Signed out".to_string());
                }
            }
            _ => {}
        }
        self.sync_route();
    }

    // =========================================================================
    // Background Results
    // =========================================================================

    pub fn check_background_tasks(&mut self) {
        // Collect all pending results first to avoid borrow conflicts
        let mut results = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            results.push(result);
        }

        for tagged in results {
            if !tagged.is_current(self.navigator.generation()) {
                debug!(
                    generation = tagged.generation,
                    current = self.navigator.generation(),
                    "Dropping result for a page that is no longer mounted"
                );
                continue;
            }
            self.task = None;
            self.process_page_result(tagged.payload);
        }

        self.sync_route();
    }

    fn process_page_result(&mut self, result: PageResult) {
        match result {
            PageResult::Login(result) => {
                let session = self.api.session().clone();
                if let Some(email) = self.login.apply_login(result, &session, &mut self.navigator) {
                    self.remember_email(email);
                    self.status_message = None;
                }
            }
            PageResult::Register(result) => {
                if self.register.apply_registered(result, &mut self.navigator) {
                    self.status_message = Some("Account created. Sign in to continue.".to_string());
                }
            }
            PageResult::Dashboard(result) => self.dashboard.apply_load(result),
            PageResult::Created(result) => {
                let created = result.is_ok();
                self.dashboard.apply_created(result);
                if created {
                    self.dashboard_focus = DashboardFocus::Table;
                    self.status_message = Some("Transaction saved".to_string());
                }
            }
            PageResult::Statistics(result) => self.statistics.apply(result),
            PageResult::MonthlyExpenses(result) => self.monthly.apply(result),
        }
    }

    fn remember_email(&mut self, email: String) {
        if self.config.last_email.as_deref() == Some(email.as_str()) {
            return;
        }
        self.config.last_email = Some(email);
        match self.config.save() {
            Ok(()) => info!("Saved last email to config"),
            Err(e) => warn!(error = %e, "Failed to save config"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so any request that escapes fails fast
    fn config() -> Config {
        Config {
            api_base_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        }
    }

    fn signed_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session
            .store_tokens(&TokenPair {
                access: Some("A".to_string()),
                refresh: Some("B".to_string()),
            })
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_guarded_start_without_token_lands_on_welcome() {
        let mut app = App::with_session(config(), SessionContext::in_memory(), Route::Dashboard).unwrap();
        app.sync_route();
        assert_eq!(app.route(), Route::Landing);
        assert_eq!(app.dashboard.state, PageState::Redirected);
        assert!(app.task.is_none());
    }

    #[tokio::test]
    async fn test_signed_in_dashboard_starts_loading() {
        let mut app = App::with_session(config(), signed_in(), Route::Dashboard).unwrap();
        app.sync_route();
        assert_eq!(app.route(), Route::Dashboard);
        assert_eq!(app.dashboard.state, PageState::Loading);
        assert!(app.task.is_some());
    }

    #[tokio::test]
    async fn test_stale_result_is_dropped() {
        let mut app = App::with_session(config(), signed_in(), Route::Dashboard).unwrap();
        app.sync_route();
        let dashboard_generation = app.navigator.generation();

        app.go(Route::Profile);
        app.go(Route::Dashboard);
        assert_eq!(app.dashboard.state, PageState::Loading);

        app.result_tx
            .try_send(Tagged {
                generation: dashboard_generation,
                payload: PageResult::Dashboard(Ok(DashboardData {
                    profile: UserProfile::default(),
                    transactions: Vec::new(),
                })),
            })
            .unwrap();
        app.check_background_tasks();
        assert_eq!(app.dashboard.state, PageState::Loading);
    }

    #[tokio::test]
    async fn test_current_result_is_applied() {
        let mut app = App::with_session(config(), signed_in(), Route::Dashboard).unwrap();
        app.sync_route();
        app.task = None;

        app.result_tx
            .try_send(Tagged {
                generation: app.navigator.generation(),
                payload: PageResult::Dashboard(Err(ApiError::InvalidResponse("x".to_string()))),
            })
            .unwrap();
        app.check_background_tasks();
        assert!(matches!(app.dashboard.state, PageState::Error(_)));
    }

    #[tokio::test]
    async fn test_sign_out_from_profile_menu() {
        let session = signed_in();
        let mut app = App::with_session(config(), session.clone(), Route::Profile).unwrap();
        app.sync_route();
        app.profile_menu.select_prev();
        app.activate_menu();
        assert!(!session.is_authenticated());
        assert_eq!(app.route(), Route::Landing);
        assert_eq!(app.status_message.as_deref(), Some("Signed out"));
    }

    #[tokio::test]
    async fn test_blank_login_spawns_nothing() {
        let mut app = App::with_session(config(), SessionContext::in_memory(), Route::Login).unwrap();
        app.sync_route();
        app.submit_login();
        assert!(app.task.is_none());
        assert!(app.login.notice.is_some());
    }
}
