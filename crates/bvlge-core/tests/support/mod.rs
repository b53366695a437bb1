//! In-process stand-in for the finance API.
//!
//! Serves every endpoint the client uses from canned data, records each
//! request (method, path, query, Authorization header, body) and can be told
//! to fail a path with a given status.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use bvlge_core::models::TokenPair;
use bvlge_core::{ApiClient, SessionContext};

pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "secret";
pub const ACCESS: &str = "A";
pub const REFRESH: &str = "B";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct StubState {
    requests: Mutex<Vec<Recorded>>,
    failures: Mutex<HashMap<String, StatusCode>>,
    transactions: Mutex<Vec<Value>>,
}

impl StubState {
    fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
        let header_text = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let recorded = Recorded {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: header_text(header::AUTHORIZATION),
            content_type: header_text(header::CONTENT_TYPE),
            body: serde_json::from_slice(body).ok(),
        };
        self.requests.lock().unwrap().push(recorded);
    }

    fn failure(&self, path: &str) -> Option<Response> {
        self.failures
            .lock()
            .unwrap()
            .get(path)
            .map(|status| (*status, "stub failure").into_response())
    }
}

pub struct StubApi {
    pub base_url: String,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl StubApi {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        state.transactions.lock().unwrap().extend([
            transaction(1, "50.00", "Food", "2024-01-05", "Loss"),
            transaction(2, "3000.00", "Salary", "2024-03-01", "Income"),
            transaction(3, "1200.00", "Rent", "2024-02-10", "Loss"),
        ]);

        let app = Router::new()
            .route("/api/users/token/", post(token))
            .route("/api/users/register/", post(register))
            .route("/api/users/user/", get(current_user))
            .route("/api/transactions/", get(list_transactions).post(create_transaction))
            .route("/api/statistics/", get(statistics))
            .route("/api/statistics/category-expenses/", get(category_expenses))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Client over a fresh in-memory session
    pub fn client(&self) -> ApiClient {
        self.client_with(SessionContext::in_memory())
    }

    pub fn client_with(&self, session: SessionContext) -> ApiClient {
        ApiClient::new(&self.base_url, session).unwrap()
    }

    pub fn fail(&self, path: &str, status: StatusCode) {
        self.state.failures.lock().unwrap().insert(path.to_string(), status);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Last request made to `path`
    pub fn last(&self, path: &str) -> Option<Recorded> {
        self.requests().into_iter().rev().find(|r| r.path == path)
    }

    pub fn set_transactions(&self, transactions: Vec<Value>) {
        *self.state.transactions.lock().unwrap() = transactions;
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub fn transaction(id: i64, amount: &str, category: &str, date: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "amount": amount,
        "category": category,
        "description": format!("{category} {id}"),
        "date": date,
        "type": kind,
        "user": 1,
    })
}

/// Session that already holds the stub's token pair
pub fn signed_in_session() -> SessionContext {
    let session = SessionContext::in_memory();
    session
        .store_tokens(&TokenPair {
            access: Some(ACCESS.to_string()),
            refresh: Some(REFRESH.to_string()),
        })
        .unwrap();
    session
}

async fn token(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record(&method, &uri, &headers, &body);
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    let credentials: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    if credentials["email"] == EMAIL && credentials["password"] == PASSWORD {
        Json(json!({ "access": ACCESS, "refresh": REFRESH })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "No active account found with the given credentials" })),
        )
            .into_response()
    }
}

async fn register(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record(&method, &uri, &headers, &body);
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    let registration: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 2,
            "email": registration["email"],
            "name": registration["name"],
            "password": "pbkdf2_sha256$hashed",
        })),
    )
        .into_response()
}

async fn current_user(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&method, &uri, &headers, &Bytes::new());
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    Json(json!({ "id": 1, "email": EMAIL, "name": "Ana", "password": "pbkdf2_sha256$hashed" }))
        .into_response()
}

async fn list_transactions(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&method, &uri, &headers, &Bytes::new());
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    let transactions = state.transactions.lock().unwrap().clone();
    Json(Value::Array(transactions)).into_response()
}

async fn create_transaction(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record(&method, &uri, &headers, &body);
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let mut transactions = state.transactions.lock().unwrap();
    let created = json!({
        "id": transactions.len() as i64 + 100,
        "amount": payload["amount"],
        "category": payload["category"],
        "description": payload["description"],
        "date": payload["date"],
        "type": payload["type"],
        "user": 1,
    });
    transactions.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn statistics(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&method, &uri, &headers, &Bytes::new());
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    Json(json!({
        "total_receitas": 3000.0,
        "total_despesas": "1250.00",
        "saldo": 1750.0,
        "categoria_mais_frequente": "Food",
        "total_transacoes": 3,
        "media_transacao": 1416.67,
    }))
    .into_response()
}

async fn category_expenses(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&method, &uri, &headers, &Bytes::new());
    if let Some(failure) = state.failure(uri.path()) {
        return failure;
    }
    Json(json!([
        { "category": "Food", "year_month": "2024-01", "avg_expense": 50.0, "total_expense": 50.0, "count": 1 },
        { "category": "Rent", "year_month": "2024-02", "avg_expense": 1200.0, "total_expense": 1200.0, "count": 1 },
    ]))
    .into_response()
}
