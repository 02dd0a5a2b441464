//! Taskboard: a personal kanban task tracker.
//!
//! Signed-in users keep tasks in three columns (Todo, Pending, Done), add and
//! rename them inline, drag them between columns, and delete them. Every task
//! belongs to exactly one user and every read or write is scoped to the
//! verified session's user.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`session`]: Credentials, sessions, and the session store port
//! - [`task`]: Task entity, repository port, and the task service
//! - [`board`]: Kanban board state, gestures, and rendering
//! - [`config`]: Environment-driven settings
//! - [`telemetry`]: Logging setup
//! - [`bootstrap`]: Adapter wiring from configuration

pub mod board;
pub mod bootstrap;
pub mod config;
pub mod session;
pub mod task;
pub mod telemetry;
