//! Step definitions for kanban board scenarios.

pub mod world;

mod then;
