//! Sign-in and sign-up pages.
//!
//! Each submission is split in two so a front-end can run the request in the
//! background: `begin_submit` validates and returns the payload, `apply_*`
//! takes the response. `submit` runs both around the API call.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::forms::{self, missing_fields_message, FormState};
use crate::models::{Credentials, Registration, TokenPair, UserProfile};
use crate::routes::{Navigator, Route, AUTHENTICATED_LANDING};
use crate::session::SessionContext;

pub const LOGIN_FAILED_NOTICE: &str = "Login failed. Check your credentials or try again.";
pub const REGISTER_FAILED_NOTICE: &str = "Registration failed. Please try again.";

/// Login form plus the notice shown after a failed attempt
#[derive(Debug, Clone)]
pub struct LoginController {
    pub form: FormState,
    pub notice: Option<String>,
    /// Email of the attempt in flight
    pending: Option<String>,
}

impl Default for LoginController {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginController {
    pub fn new() -> Self {
        Self {
            form: FormState::new(forms::LOGIN),
            notice: None,
            pending: None,
        }
    }

    /// Pre-fill the email field (last used address)
    pub fn with_email(mut self, email: &str) -> Self {
        self.form.set("email", email);
        if !email.is_empty() {
            self.form.set_focus(1);
        }
        self
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Presence-check the form and return the credentials to send
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.pending.is_some() {
            return None;
        }
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            self.notice = Some(missing_fields_message(&missing));
            return None;
        }
        self.notice = None;
        let credentials = Credentials {
            email: self.form.take_trimmed("email"),
            password: self.form.value("password").to_string(),
        };
        self.pending = Some(credentials.email.clone());
        Some(credentials)
    }

    /// Store the returned tokens and move to the dashboard. Returns the email
    /// that signed in.
    pub fn apply_login(
        &mut self,
        result: Result<TokenPair, ApiError>,
        session: &SessionContext,
        navigator: &mut Navigator,
    ) -> Option<String> {
        let email = self.pending.take()?;

        let tokens = match result {
            Ok(tokens) => tokens,
            Err(e) => {
                error!(error = %e, "Login failed");
                self.notice = Some(LOGIN_FAILED_NOTICE.to_string());
                return None;
            }
        };

        if let Err(e) = session.store_tokens(&tokens) {
            warn!(error = %e, "Failed to store session tokens");
            self.notice = Some(LOGIN_FAILED_NOTICE.to_string());
            return None;
        }

        info!(email = %email, "Login successful");
        self.form.reset();
        navigator.navigate(AUTHENTICATED_LANDING);
        Some(email)
    }

    /// Submit the form and apply the response
    pub async fn submit(&mut self, api: &ApiClient, navigator: &mut Navigator) -> Option<String> {
        let credentials = self.begin_submit()?;
        let result = api.login(&credentials).await;
        self.apply_login(result, api.session(), navigator)
    }
}

/// Registration form plus the notice shown after a failed attempt
#[derive(Debug, Clone)]
pub struct RegisterController {
    pub form: FormState,
    pub notice: Option<String>,
    submitting: bool,
}

impl Default for RegisterController {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterController {
    pub fn new() -> Self {
        Self {
            form: FormState::new(forms::REGISTER),
            notice: None,
            submitting: false,
        }
    }

    /// Whether the confirmation matches. Informational only: submission is
    /// never blocked on it.
    pub fn passwords_match(&self) -> bool {
        self.form.value("password") == self.form.value("password_confirm")
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Presence-check the form, clear any stored session and return the
    /// payload. The session is cleared before the request goes out.
    pub fn begin_submit(&mut self, session: &SessionContext) -> Option<Registration> {
        if self.submitting {
            return None;
        }
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            self.notice = Some(missing_fields_message(&missing));
            return None;
        }
        self.notice = None;

        if let Err(e) = session.clear() {
            warn!(error = %e, "Failed to clear session before registration");
            self.notice = Some(REGISTER_FAILED_NOTICE.to_string());
            return None;
        }

        self.submitting = true;
        Some(Registration {
            email: self.form.take_trimmed("email"),
            name: self.form.take_trimmed("name"),
            password: self.form.value("password").to_string(),
        })
    }

    /// On success reset the form and move to login
    pub fn apply_registered(
        &mut self,
        result: Result<UserProfile, ApiError>,
        navigator: &mut Navigator,
    ) -> bool {
        if !std::mem::take(&mut self.submitting) {
            return false;
        }
        match result {
            Ok(user) => {
                info!(id = user.id, email = %user.email, "Registration successful");
                self.form.reset();
                navigator.navigate(Route::Login);
                true
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                self.notice = Some(REGISTER_FAILED_NOTICE.to_string());
                false
            }
        }
    }

    /// Submit the form and apply the response
    pub async fn submit(&mut self, api: &ApiClient, navigator: &mut Navigator) -> bool {
        let Some(registration) = self.begin_submit(api.session()) else {
            return false;
        };
        let result = api.register(&registration).await;
        self.apply_registered(result, navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenPair {
        TokenPair {
            access: Some("A".to_string()),
            refresh: Some("B".to_string()),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut login = LoginController::new();
        login.form.set("email", "ana@example.com");
        assert!(login.begin_submit().is_none());
        assert_eq!(login.notice.as_deref(), Some("Required: Password"));
        assert!(!login.is_submitting());
    }

    #[test]
    fn test_with_email_moves_focus_to_password() {
        let login = LoginController::new().with_email("ana@example.com");
        assert_eq!(login.form.value("email"), "ana@example.com");
        assert_eq!(login.form.focus(), 1);
    }

    #[test]
    fn test_apply_login_stores_tokens_and_navigates() {
        let session = SessionContext::in_memory();
        let mut nav = Navigator::new(Route::Login);
        let mut login = LoginController::new();
        login.form.set("email", " ana@example.com ");
        login.form.set("password", "pw");

        let credentials = login.begin_submit().unwrap();
        assert_eq!(credentials.email, "ana@example.com");
        assert!(login.begin_submit().is_none());

        let email = login.apply_login(Ok(tokens()), &session, &mut nav);
        assert_eq!(email.as_deref(), Some("ana@example.com"));
        assert_eq!(session.access_token().as_deref(), Some("A"));
        assert_eq!(session.refresh_token().as_deref(), Some("B"));
        assert_eq!(nav.current(), Route::Dashboard);
    }

    #[test]
    fn test_late_login_response_without_attempt_is_ignored() {
        let session = SessionContext::in_memory();
        let mut nav = Navigator::new(Route::Login);
        let mut login = LoginController::new();
        assert!(login.apply_login(Ok(tokens()), &session, &mut nav).is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_password_confirmation_is_not_enforced() {
        let session = SessionContext::in_memory();
        let mut register = RegisterController::new();
        register.form.set("name", "Ana");
        register.form.set("email", "ana@example.com");
        register.form.set("password", "one");
        register.form.set("password_confirm", "two");
        assert!(!register.passwords_match());
        let registration = register.begin_submit(&session).unwrap();
        assert_eq!(registration.password, "one");
    }

    #[test]
    fn test_begin_register_clears_session() {
        let session = SessionContext::in_memory();
        session.store_tokens(&tokens()).unwrap();
        let mut register = RegisterController::new();
        for key in ["name", "email", "password", "password_confirm"] {
            register.form.set(key, "x");
        }
        assert!(register.begin_submit(&session).is_some());
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn test_blank_register_keeps_session() {
        let session = SessionContext::in_memory();
        session.store_tokens(&tokens()).unwrap();
        let mut register = RegisterController::new();
        assert!(register.begin_submit(&session).is_none());
        assert!(session.is_authenticated());
    }
}
