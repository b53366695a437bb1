//! Session storage.
//!
//! This module provides:
//! - `SessionStore`: durable key/value storage for the two session tokens
//! - `FileSessionStore`, `KeyringSessionStore`, `MemorySessionStore` backends
//! - `SessionContext`: the shared handle injected into the API client,
//!   route guard and page controllers
//!
//! Tokens are kept under the keys `access_token` and `refresh_token`.

pub mod context;
pub mod keychain;
pub mod store;

pub use context::{Session, SessionContext, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use keychain::KeyringSessionStore;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
