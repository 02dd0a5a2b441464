//! Port contracts for the external session store and profile directory.

pub mod profile;
pub mod store;

pub use profile::ProfileDirectory;
pub use store::{SessionStore, SessionStoreResult};
