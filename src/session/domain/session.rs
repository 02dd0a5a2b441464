//! Authenticated session values.

use super::{EmailAddress, SessionToken, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Authenticated identity context that scopes every task operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    email: EmailAddress,
    token: SessionToken,
    issued_at: DateTime<Utc>,
}

impl Session {
    /// Issues a new session with a fresh token.
    #[must_use]
    pub fn issue(user_id: UserId, email: EmailAddress, clock: &impl Clock) -> Self {
        Self {
            user_id,
            email,
            token: SessionToken::generate(),
            issued_at: clock.utc(),
        }
    }

    /// Reconstructs a session issued by an external store.
    #[must_use]
    pub const fn from_parts(
        user_id: UserId,
        email: EmailAddress,
        token: SessionToken,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            email,
            token,
            issued_at,
        }
    }

    /// Returns the authenticated user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the session token.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns when the session was issued.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}
