//! REST API client module.
//!
//! This module provides the `ApiClient` for the finance API (users,
//! transactions, statistics) and the `ApiError` it returns.
//!
//! The API uses JWT bearer token authentication; tokens come from the
//! `/api/users/token/` endpoint and are read from the session store on
//! every request.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
