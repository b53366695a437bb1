//! Route guard: a presence check on the stored access token.
//!
//! The guard never validates the token. An expired or malformed token passes
//! and is only caught when the page's first API call fails.

use tracing::debug;

use crate::routes::{Navigator, Route, UNAUTHENTICATED_LANDING};
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Decide whether `route` may mount
    pub fn check(&self, route: Route) -> GuardOutcome {
        if !route.requires_auth() || self.session.is_authenticated() {
            GuardOutcome::Allow
        } else {
            debug!(%route, "No access token, redirecting");
            GuardOutcome::Redirect(UNAUTHENTICATED_LANDING)
        }
    }

    /// Run the guard for the navigator's current route, redirecting when it
    /// fails. Returns true when the page may proceed with its fetches.
    pub fn enter(&self, navigator: &mut Navigator) -> bool {
        match self.check(navigator.current()) {
            GuardOutcome::Allow => true,
            GuardOutcome::Redirect(target) => {
                navigator.replace(target);
                false
            }
        }
    }
}
