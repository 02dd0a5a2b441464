//! Sign-up and login form state.

use std::sync::Arc;

use super::{loading::LoadingIndicator, navigation::Route};
use crate::session::{domain::Credentials, ports::SessionStore};

/// Which form the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Account registration.
    SignUp,
    /// Sign in to an existing account.
    Login,
}

impl AuthMode {
    /// Route to follow after a successful submit.
    #[must_use]
    pub const fn success_route(self) -> Route {
        match self {
            Self::SignUp => Route::Login,
            Self::Login => Route::Tasks,
        }
    }
}

/// Email and password form backed by a [`SessionStore`].
pub struct AuthPage<S: SessionStore> {
    sessions: Arc<S>,
    mode: AuthMode,
    email: String,
    password: String,
    loading: LoadingIndicator,
    error: Option<String>,
}

impl<S: SessionStore> AuthPage<S> {
    /// Creates an empty form.
    #[must_use]
    pub fn new(sessions: Arc<S>, mode: AuthMode) -> Self {
        Self {
            sessions,
            mode,
            email: String::new(),
            password: String::new(),
            loading: LoadingIndicator::default(),
            error: None,
        }
    }

    /// Replaces the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replaces the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Submits the form.
    ///
    /// Returns the route to navigate to on success. On failure the store's
    /// message is kept in [`Self::error`] and `None` is returned.
    #[tracing::instrument(skip_all, fields(mode = ?self.mode))]
    pub async fn submit(&mut self) -> Option<Route> {
        let credentials = match Credentials::parse(self.email.as_str(), self.password.as_str()) {
            Ok(credentials) => credentials,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };

        let in_flight = self.loading.start();
        let result = match self.mode {
            AuthMode::SignUp => self.sessions.sign_up(&credentials).await,
            AuthMode::Login => self.sessions.sign_in(&credentials).await,
        };
        drop(in_flight);

        match result {
            Ok(_) => {
                self.error = None;
                self.password.clear();
                Some(self.mode.success_route())
            }
            Err(err) => {
                tracing::warn!(error = %err, "authentication failed");
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Returns which form is shown.
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Returns the email field.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether a submit is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Returns a handle that observes this page's outstanding submit.
    #[must_use]
    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.loading.clone()
    }
}
