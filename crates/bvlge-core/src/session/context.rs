use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use crate::models::TokenPair;

use super::{MemorySessionStore, SessionStore};

/// Storage key for the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the refresh token (stored, never exchanged)
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Point-in-time view of the stored tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Shared handle to the session store.
///
/// Passed explicitly to the API client, the route guard and the page
/// controllers. Clone is cheap (one `Arc`).
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Context over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Read a key, treating storage failures as absence
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read session value");
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn snapshot(&self) -> Session {
        Session {
            access_token: self.access_token(),
            refresh_token: self.refresh_token(),
        }
    }

    /// Persist the tokens from a login response. Only tokens present in the
    /// response are written; a missing one leaves any stored value alone.
    pub fn store_tokens(&self, tokens: &TokenPair) -> Result<()> {
        if let Some(ref access) = tokens.access {
            self.store.set(ACCESS_TOKEN_KEY, access)?;
        }
        if let Some(ref refresh) = tokens.refresh {
            self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        debug!(
            access = tokens.access.is_some(),
            refresh = tokens.refresh.is_some(),
            "Session tokens stored"
        );
        Ok(())
    }

    /// Remove both tokens
    pub fn clear(&self) -> Result<()> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FileSessionStore;

    #[test]
    fn test_store_tokens_writes_both() {
        let session = SessionContext::in_memory();
        session
            .store_tokens(&TokenPair {
                access: Some("A".to_string()),
                refresh: Some("B".to_string()),
            })
            .unwrap();

        assert_eq!(session.access_token().as_deref(), Some("A"));
        assert_eq!(session.refresh_token().as_deref(), Some("B"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_store_tokens_skips_absent_values() {
        let session = SessionContext::in_memory();
        session.store().set(REFRESH_TOKEN_KEY, "old-refresh").unwrap();

        session
            .store_tokens(&TokenPair {
                access: Some("A".to_string()),
                refresh: None,
            })
            .unwrap();

        assert_eq!(session.access_token().as_deref(), Some("A"));
        assert_eq!(session.refresh_token().as_deref(), Some("old-refresh"));
    }

    #[test]
    fn test_new_login_overwrites_previous_access_token() {
        let session = SessionContext::in_memory();
        session.store().set(ACCESS_TOKEN_KEY, "first").unwrap();
        session
            .store_tokens(&TokenPair {
                access: Some("second".to_string()),
                refresh: None,
            })
            .unwrap();
        assert_eq!(session.access_token().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear() {
        let session = SessionContext::in_memory();
        session.store().set(ACCESS_TOKEN_KEY, "A").unwrap();
        session.store().set(REFRESH_TOKEN_KEY, "B").unwrap();
        session.clear().unwrap();
        assert_eq!(session.snapshot(), Session::default());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let session = SessionContext::in_memory();
        session.store().set(ACCESS_TOKEN_KEY, "").unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_and_clear_recover_from_corrupt_session_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), r#"{"access_tok"#).unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        let session = SessionContext::new(Arc::new(store));
        assert!(!session.is_authenticated());

        session
            .store_tokens(&TokenPair {
                access: Some("A".to_string()),
                refresh: Some("B".to_string()),
            })
            .unwrap();
        assert_eq!(session.access_token().as_deref(), Some("A"));

        std::fs::write(dir.path().join("session.json"), "garbage").unwrap();
        session.clear().unwrap();
        assert_eq!(session.snapshot(), Session::default());
    }
}
