//! Error types for authentication and session handling.

use thiserror::Error;

/// Errors returned by sign-up, sign-in, and session verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The password is shorter than the accepted minimum.
    #[error("password should be at least {min_length} characters")]
    WeakPassword {
        /// Minimum accepted password length in characters.
        min_length: usize,
    },

    /// An account already exists for the email address.
    #[error("user already registered")]
    EmailAlreadyRegistered,

    /// The email and password do not match a known account.
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// The session store itself failed.
    #[error("session store error: {0}")]
    Backend(String),
}
