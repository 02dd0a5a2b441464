//! Kanban board presentation.
//!
//! Everything here is toolkit-agnostic: the board is a controller holding
//! the task list and form state, plus a markup renderer. A UI layer feeds
//! gestures in and reads [`BoardController::view`] or [`render_board`] out.
//!
//! - `columns`: grouping tasks by status
//! - `drag`: normalized drop events
//! - `editor`: the add composer and the row editor
//! - `controller`: the board state machine
//! - `loading`: the outstanding-call indicator
//! - `auth_page`: sign-up and login forms
//! - `render`: HTML rendering with `minijinja`

pub mod auth_page;
pub mod columns;
pub mod controller;
pub mod drag;
pub mod editor;
pub mod loading;
pub mod navigation;
pub mod render;

pub use auth_page::{AuthMode, AuthPage};
pub use columns::{BoardColumn, group_by_status};
pub use controller::{BoardController, BoardSettings};
pub use drag::{DropEvent, DropEventError, DropOutcome};
pub use editor::{AddComposer, RowEditor, RowState};
pub use loading::LoadingIndicator;
pub use navigation::Route;
pub use render::{BoardView, CardView, ColumnView, RenderError, render_board};

#[cfg(test)]
mod tests;
