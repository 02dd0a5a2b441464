//! Unit tests for the board presentation module.
