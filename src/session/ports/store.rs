//! Session store port for authentication and session validation.

use crate::session::domain::{AuthError, Credentials, Session, UserId};
use async_trait::async_trait;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, AuthError>;

/// Authentication backend contract.
///
/// The store owns the notion of a "current" session for the client it
/// serves, and can confirm whether a session handed back to it is still live.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current session, or `None` when signed out.
    async fn current_session(&self) -> SessionStoreResult<Option<Session>>;

    /// Signs in with existing credentials and makes the session current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email and password
    /// do not match an account.
    async fn sign_in(&self, credentials: &Credentials) -> SessionStoreResult<Session>;

    /// Registers a new account, signs it in, and makes the session current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailAlreadyRegistered`] when the email is taken.
    async fn sign_up(&self, credentials: &Credentials) -> SessionStoreResult<Session>;

    /// Ends the current session. Signing out while signed out is a no-op.
    async fn sign_out(&self) -> SessionStoreResult<()>;

    /// Confirms a session is still live and returns its user.
    ///
    /// Returns `None` for expired, revoked, or unknown tokens.
    async fn verify(&self, session: &Session) -> SessionStoreResult<Option<UserId>>;
}
