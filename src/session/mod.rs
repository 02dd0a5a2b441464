//! Authentication and session handling.
//!
//! The hosted authentication backend is an external collaborator. This module
//! defines the values exchanged with it and the ports used to reach it:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
