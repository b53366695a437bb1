//! API client for the finance REST API.
//!
//! Every request goes through `ApiClient::request`, which reads the access
//! token from the injected `SessionContext` at the moment the request is
//! built and attaches it as a bearer header.

use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{
    CategoryExpenseRow, Credentials, DateRange, NewTransaction, Registration, StatisticsSummary,
    TokenPair, Transaction, UserProfile,
};
use crate::session::SessionContext;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default API origin (local development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const TOKEN_PATH: &str = "/api/users/token/";
const REGISTER_PATH: &str = "/api/users/register/";
const CURRENT_USER_PATH: &str = "/api/users/user/";
const TRANSACTIONS_PATH: &str = "/api/transactions/";
const STATISTICS_PATH: &str = "/api/statistics/";
const CATEGORY_EXPENSES_PATH: &str = "/api/statistics/category-expenses/";

/// API client for the finance service.
/// Clone is cheap - reqwest::Client and the session context are both Arc-backed.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a client for `base_url` with the transport's default timeouts
    pub fn new(base_url: &str, session: SessionContext) -> Result<Self> {
        Self::build(base_url, None, session)
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config, session: SessionContext) -> Result<Self> {
        Self::build(
            &config.api_base_url(),
            config.request_timeout_secs.map(Duration::from_secs),
            session,
        )
    }

    fn build(base_url: &str, timeout: Option<Duration>, session: SessionContext) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the session's bearer token attached.
    ///
    /// The token is read on every call. With no stored token the request goes
    /// out without an `Authorization` header, which is what the login and
    /// registration endpoints expect.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%method, path, "Sending API request");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, path, error = %e, "API request failed to send");
                return Err(ApiError::Network(e));
            }
        };

        let response = match Self::check_response(response).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, path, error = %e, "API request rejected");
                return Err(e);
            }
        };

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(%method, path, error = %e, "Failed to parse API response");
            ApiError::InvalidResponse(format!("{} {}: {}", method, path, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        self.send(Method::GET, path, builder).await
    }

    async fn get_with_range<T: DeserializeOwned>(
        &self,
        path: &str,
        range: &DateRange,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).query(&range.query_pairs());
        self.send(Method::GET, path, builder).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    // ===== Authentication =====

    /// Exchange credentials for a token pair. Does not touch the session store.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.post(TOKEN_PATH, credentials).await
    }

    /// Create an account; returns the API's representation of the new user
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        self.post(REGISTER_PATH, registration).await
    }

    /// Fetch the profile of the user owning the current token
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    // ===== Transactions =====

    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get(TRANSACTIONS_PATH).await
    }

    pub async fn create_transaction(&self, payload: &NewTransaction) -> Result<Transaction, ApiError> {
        self.post(TRANSACTIONS_PATH, payload).await
    }

    // ===== Statistics =====

    pub async fn statistics(&self, range: &DateRange) -> Result<StatisticsSummary, ApiError> {
        self.get_with_range(STATISTICS_PATH, range).await
    }

    pub async fn category_expenses(&self, range: &DateRange) -> Result<Vec<CategoryExpenseRow>, ApiError> {
        self.get_with_range(CATEGORY_EXPENSES_PATH, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ACCESS_TOKEN_KEY;

    fn client_with(session: SessionContext) -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000/", session).expect("client builds")
    }

    #[test]
    fn test_request_attaches_stored_token() {
        let session = SessionContext::in_memory();
        session.store().set(ACCESS_TOKEN_KEY, "tok-123").unwrap();
        let api = client_with(session);

        let request = api.request(Method::GET, TRANSACTIONS_PATH).build().unwrap();
        let auth = request.headers().get(header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn test_request_without_token_has_no_authorization() {
        let api = client_with(SessionContext::in_memory());
        let request = api.request(Method::POST, TOKEN_PATH).build().unwrap();
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_is_read_per_request() {
        let session = SessionContext::in_memory();
        let api = client_with(session.clone());

        let before = api.request(Method::GET, CURRENT_USER_PATH).build().unwrap();
        assert!(before.headers().get(header::AUTHORIZATION).is_none());

        session.store().set(ACCESS_TOKEN_KEY, "later").unwrap();
        let after = api.request(Method::GET, CURRENT_USER_PATH).build().unwrap();
        assert_eq!(
            after.headers().get(header::AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer later"
        );
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let api = client_with(SessionContext::in_memory());
        assert_eq!(api.base_url(), "http://127.0.0.1:8000");
        let request = api.request(Method::GET, "api/transactions/").build().unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:8000/api/transactions/");
    }

    #[test]
    fn test_range_becomes_query_string() {
        let api = client_with(SessionContext::in_memory());
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let request = api
            .request(Method::GET, STATISTICS_PATH)
            .query(&range.query_pairs())
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("start_date=2024-01-01&end_date=2024-01-31"));
    }
}
