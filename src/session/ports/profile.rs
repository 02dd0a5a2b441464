//! Profile lookup port.

use crate::session::domain::{AuthError, UserId};
use async_trait::async_trait;

/// Read access to user profile data.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Returns the user's avatar URL, or `None` when unset or unknown.
    async fn avatar_url(&self, user_id: UserId) -> Result<Option<String>, AuthError>;
}
