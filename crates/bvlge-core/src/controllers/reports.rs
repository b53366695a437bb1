//! Statistics and monthly expense pages.
//!
//! Both pages are a pair of optional date bounds and a search action. A
//! search replaces the shown data on success and clears it on failure.

use tracing::{error, info};

use crate::api::{ApiClient, ApiError};
use crate::forms::{self, FormState};
use crate::guard::RouteGuard;
use crate::models::{CategoryExpenseRow, DateRange, StatisticsSummary};
use crate::routes::Navigator;

pub const STATISTICS_FAILED: &str = "Failed to load statistics.";
pub const MONTHLY_EXPENSES_FAILED: &str = "Failed to load monthly expenses.";

#[derive(Debug, Clone)]
pub struct ReportPage<T> {
    pub form: FormState,
    data: Option<T>,
    /// Last failure or input error, shown inline
    pub error: Option<String>,
    loading: bool,
    failed_message: &'static str,
}

pub type StatisticsPage = ReportPage<StatisticsSummary>;
pub type MonthlyExpensePage = ReportPage<Vec<CategoryExpenseRow>>;

impl<T> ReportPage<T> {
    fn with_message(failed_message: &'static str) -> Self {
        Self {
            form: FormState::new(forms::DATE_RANGE),
            data: None,
            error: None,
            loading: false,
            failed_message,
        }
    }

    /// Run the route guard. Returns false when the navigator was redirected.
    pub fn mount(&mut self, guard: &RouteGuard, navigator: &mut Navigator) -> bool {
        guard.enter(navigator)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Parse the bounds and mark the page loading. Returns None (with the
    /// input error set) when a bound is not a date, or when a search is
    /// already running.
    pub fn begin_search(&mut self) -> Option<DateRange> {
        if self.loading {
            return None;
        }
        match DateRange::parse(self.form.value("start_date"), self.form.value("end_date")) {
            Ok(range) => {
                self.loading = true;
                Some(range)
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    /// Apply a search response
    pub fn apply(&mut self, result: Result<T, ApiError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "Report search failed");
                self.data = None;
                self.error = Some(self.failed_message.to_string());
            }
        }
    }
}

impl Default for StatisticsPage {
    fn default() -> Self {
        Self::with_message(STATISTICS_FAILED)
    }
}

impl StatisticsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn search(&mut self, api: &ApiClient) {
        let Some(range) = self.begin_search() else {
            return;
        };
        let result = api.statistics(&range).await;
        if let Ok(summary) = &result {
            info!(transactions = summary.transaction_count, "Statistics loaded");
        }
        self.apply(result);
    }
}

impl Default for MonthlyExpensePage {
    fn default() -> Self {
        Self::with_message(MONTHLY_EXPENSES_FAILED)
    }
}

impl MonthlyExpensePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn search(&mut self, api: &ApiClient) {
        let Some(range) = self.begin_search() else {
            return;
        };
        let result = api.category_expenses(&range).await;
        if let Ok(rows) = &result {
            info!(rows = rows.len(), "Monthly expenses loaded");
        }
        self.apply(result);
    }

    /// Rows to show; empty before the first successful search
    pub fn rows(&self) -> &[CategoryExpenseRow] {
        self.data().map(Vec::as_slice).unwrap_or(&[])
    }
}
