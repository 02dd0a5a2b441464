//! Domain model for authentication and sessions.

mod credentials;
mod error;
mod ids;
mod session;

pub use credentials::{Credentials, EmailAddress, MIN_PASSWORD_LENGTH, Password};
pub use error::AuthError;
pub use ids::{SessionToken, UserId};
pub use session::Session;
