//! In-memory session store and profile directory.
//!
//! These adapters stand in for the hosted authentication backend in tests
//! and local runs. Passwords are kept only as salted SHA-256 digests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::session::{
    domain::{AuthError, Credentials, EmailAddress, Password, Session, SessionToken, UserId},
    ports::{ProfileDirectory, SessionStore, SessionStoreResult},
};

/// Thread-safe in-memory session store.
pub struct InMemorySessionStore<C = DefaultClock> {
    state: Arc<RwLock<SessionState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct SessionState {
    accounts: HashMap<EmailAddress, Account>,
    live: HashMap<SessionToken, Session>,
    current: Option<SessionToken>,
}

#[derive(Debug)]
struct Account {
    user_id: UserId,
    password_digest: Vec<u8>,
}

impl InMemorySessionStore<DefaultClock> {
    /// Creates an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemorySessionStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemorySessionStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store that stamps sessions with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            clock: Arc::new(clock),
        }
    }

    fn read(&self) -> SessionStoreResult<RwLockReadGuard<'_, SessionState>> {
        self.state
            .read()
            .map_err(|err| AuthError::Backend(err.to_string()))
    }

    fn write(&self) -> SessionStoreResult<RwLockWriteGuard<'_, SessionState>> {
        self.state
            .write()
            .map_err(|err| AuthError::Backend(err.to_string()))
    }

    fn start_session(
        &self,
        state: &mut SessionState,
        user_id: UserId,
        email: EmailAddress,
    ) -> Session {
        let session = Session::issue(user_id, email, &*self.clock);
        if let Some(previous) = state.current.replace(session.token().clone()) {
            state.live.remove(&previous);
        }
        state.live.insert(session.token().clone(), session.clone());
        session
    }
}

impl<C> Clone for InMemorySessionStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemorySessionStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySessionStore").finish_non_exhaustive()
    }
}

fn password_digest(user_id: UserId, password: &Password) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(user_id.into_inner().as_bytes());
    hasher.update(password.expose().as_bytes());
    hasher.finalize().to_vec()
}

#[async_trait]
impl<C> SessionStore for InMemorySessionStore<C>
where
    C: Clock + Send + Sync,
{
    async fn current_session(&self) -> SessionStoreResult<Option<Session>> {
        let state = self.read()?;
        Ok(state
            .current
            .as_ref()
            .and_then(|token| state.live.get(token))
            .cloned())
    }

    #[tracing::instrument(skip_all, fields(email = %credentials.email()))]
    async fn sign_in(&self, credentials: &Credentials) -> SessionStoreResult<Session> {
        let mut state = self.write()?;
        let user_id = state
            .accounts
            .get(credentials.email())
            .filter(|account| {
                account.password_digest == password_digest(account.user_id, credentials.password())
            })
            .map(|account| account.user_id)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = self.start_session(&mut state, user_id, credentials.email().clone());
        tracing::debug!(user_id = %user_id, "signed in");
        Ok(session)
    }

    #[tracing::instrument(skip_all, fields(email = %credentials.email()))]
    async fn sign_up(&self, credentials: &Credentials) -> SessionStoreResult<Session> {
        let mut state = self.write()?;
        if state.accounts.contains_key(credentials.email()) {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let user_id = UserId::new();
        state.accounts.insert(
            credentials.email().clone(),
            Account {
                user_id,
                password_digest: password_digest(user_id, credentials.password()),
            },
        );
        let session = self.start_session(&mut state, user_id, credentials.email().clone());
        tracing::info!(user_id = %user_id, "account registered");
        Ok(session)
    }

    async fn sign_out(&self) -> SessionStoreResult<()> {
        let mut state = self.write()?;
        if let Some(token) = state.current.take() {
            state.live.remove(&token);
        }
        Ok(())
    }

    async fn verify(&self, session: &Session) -> SessionStoreResult<Option<UserId>> {
        let state = self.read()?;
        Ok(state
            .live
            .get(session.token())
            .filter(|live| live.user_id() == session.user_id())
            .map(Session::user_id))
    }
}

/// Thread-safe in-memory profile directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileDirectory {
    avatars: Arc<RwLock<HashMap<UserId, String>>>,
}

impl InMemoryProfileDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the avatar URL for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the directory lock is poisoned.
    pub fn set_avatar_url(&self, user_id: UserId, url: impl Into<String>) -> Result<(), AuthError> {
        let mut avatars = self
            .avatars
            .write()
            .map_err(|err| AuthError::Backend(err.to_string()))?;
        avatars.insert(user_id, url.into());
        Ok(())
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn avatar_url(&self, user_id: UserId) -> Result<Option<String>, AuthError> {
        let avatars = self
            .avatars
            .read()
            .map_err(|err| AuthError::Backend(err.to_string()))?;
        Ok(avatars.get(&user_id).cloned())
    }
}
