//! Core library for bvlge, a personal-finance client.
//!
//! Holds everything that is not drawing: the session store, the API client
//! with its bearer-token interceptor, the route guard, form state, pagination
//! and the per-page controllers. Front-ends drive the controllers and render
//! their state.

pub mod api;
pub mod config;
pub mod controllers;
pub mod forms;
pub mod guard;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod session;
pub mod task;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use guard::{GuardOutcome, RouteGuard};
pub use routes::{Navigator, Route};
pub use session::SessionContext;
