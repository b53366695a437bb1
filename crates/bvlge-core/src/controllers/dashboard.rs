//! Dashboard: profile header, transaction table and the create form.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::forms::{self, missing_fields_message, FormState};
use crate::guard::RouteGuard;
use crate::models::{sort_newest_first, NewTransaction, Transaction, UserProfile};
use crate::pagination::Paginator;
use crate::routes::Navigator;

use super::PageState;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load your profile or transactions.";
pub const CREATE_FAILED_ALERT: &str = "Could not save the transaction. Please try again.";

/// Everything the dashboard fetches on mount
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub profile: UserProfile,
    pub transactions: Vec<Transaction>,
}

/// Fetch the profile, then the transactions. The first failure stops the load.
pub async fn load_dashboard(api: &ApiClient) -> Result<DashboardData, ApiError> {
    let profile = api.current_user().await?;
    let transactions = api.transactions().await?;
    Ok(DashboardData {
        profile,
        transactions,
    })
}

#[derive(Debug, Clone)]
pub struct DashboardController {
    pub state: PageState,
    pub profile: Option<UserProfile>,
    transactions: Vec<Transaction>,
    pub pager: Paginator,
    pub form: FormState,
    /// Transient message after a failed or incomplete submission
    pub alert: Option<String>,
}

impl DashboardController {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PageState::Loading,
            profile: None,
            transactions: Vec::new(),
            pager: Paginator::new(page_size),
            form: FormState::new(forms::TRANSACTION),
            alert: None,
        }
    }

    /// Run the route guard. Returns true when the page should fetch; on
    /// false the navigator has already been redirected.
    pub fn mount(&mut self, guard: &RouteGuard, navigator: &mut Navigator) -> bool {
        if guard.enter(navigator) {
            self.state = PageState::Loading;
            true
        } else {
            self.state = PageState::Redirected;
            false
        }
    }

    /// Apply the outcome of `load_dashboard`
    pub fn apply_load(&mut self, result: Result<DashboardData, ApiError>) {
        match result {
            Ok(data) => {
                info!(count = data.transactions.len(), "Dashboard loaded");
                self.profile = Some(data.profile);
                self.transactions = data.transactions;
                sort_newest_first(&mut self.transactions);
                self.pager.clamp(self.transactions.len());
                self.state = PageState::Ready;
            }
            Err(e) => {
                error!(error = %e, "Failed to load dashboard");
                self.state = PageState::Error(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Guard, then load. Makes no API call when the guard redirects.
    pub async fn mount_and_load(
        &mut self,
        api: &ApiClient,
        guard: &RouteGuard,
        navigator: &mut Navigator,
    ) {
        if self.mount(guard, navigator) {
            let result = load_dashboard(api).await;
            self.apply_load(result);
        }
    }

    /// Validate the form and move to `Submitting`. Returns the payload to
    /// send, or None when the page is not ready or fields are blank.
    pub fn begin_submit(&mut self) -> Option<NewTransaction> {
        if self.state != PageState::Ready {
            return None;
        }
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            self.alert = Some(missing_fields_message(&missing));
            return None;
        }
        self.alert = None;
        self.state = PageState::Submitting;
        Some(NewTransaction {
            amount: self.form.take_trimmed("amount"),
            category: self.form.take_trimmed("category"),
            description: self.form.take_trimmed("description"),
            date: self.form.take_trimmed("date"),
            kind: self.form.take_trimmed("type"),
        })
    }

    /// Apply the create response and return to `Ready`
    pub fn apply_created(&mut self, result: Result<Transaction, ApiError>) {
        if self.state != PageState::Submitting {
            return;
        }
        self.state = PageState::Ready;
        match result {
            Ok(transaction) => {
                info!(id = transaction.id, "Transaction created");
                self.insert(transaction);
                self.form.reset();
            }
            Err(e) => {
                warn!(error = %e, "Failed to create transaction");
                self.alert = Some(CREATE_FAILED_ALERT.to_string());
            }
        }
    }

    /// Submit the form and apply the response
    pub async fn submit(&mut self, api: &ApiClient) -> bool {
        let Some(payload) = self.begin_submit() else {
            return false;
        };
        let result = api.create_transaction(&payload).await;
        let created = result.is_ok();
        self.apply_created(result);
        created
    }

    /// Add a server-confirmed record without refetching. The new record goes
    /// first among records sharing its date.
    fn insert(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        sort_newest_first(&mut self.transactions);
        self.pager.clamp(self.transactions.len());
    }

    /// All transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn page_items(&self) -> &[Transaction] {
        self.pager.current(&self.transactions)
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count(self.transactions.len())
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.transactions.len());
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }
}
