//! User-owned task management.
//!
//! Tasks live in a remote table filtered by owner. Reads and writes go
//! through [`services::TaskService`], which scopes every call by the verified
//! session and re-reads the owner's full list after each mutation. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
