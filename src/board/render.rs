//! HTML rendering of the board view.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use thiserror::Error;

/// Render model for the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Avatar shown in the header.
    pub avatar_url: String,
    /// Whether a service call is outstanding.
    pub loading: bool,
    /// User-visible error message.
    pub error: Option<String>,
    /// Columns in board order.
    pub columns: Vec<ColumnView>,
}

/// Render model for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// Column heading and drop target id.
    pub status: &'static str,
    /// Whether the "add" affordance is shown.
    pub can_add: bool,
    /// Draft text when the add composer is open on this column.
    pub composer: Option<String>,
    /// Cards in list order.
    pub tasks: Vec<CardView>,
}

/// Render model for one task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Task id, used as the draggable item id.
    pub id: String,
    /// Task name.
    pub name: String,
    /// Edit draft when the row is being renamed.
    pub editing: Option<String>,
    /// Whether a delete confirmation is showing.
    pub confirm_delete: bool,
}

/// Errors raised while rendering markup.
#[derive(Debug, Error)]
#[error("failed to render board: {0}")]
pub struct RenderError(#[from] minijinja::Error);

const BOARD_TEMPLATE: &str = r#"<header class="board-header">
  <img class="avatar" src="{{ avatar_url }}" alt="avatar">
  <button type="button" data-action="sign-out">Sign out</button>
</header>
{% if error %}<p class="error" role="alert">{{ error }}</p>{% endif %}
{% if loading %}<p class="loading">Loading…</p>{% endif %}
<main class="board">
{%- for column in columns %}
  <section class="column" data-column="{{ column.status }}">
    <h2>{{ column.status }}</h2>
    <ul>
    {%- for task in column.tasks %}
      <li class="card" draggable="true" data-task-id="{{ task.id }}">
      {%- if task.editing is not none %}
        <input name="task_name" value="{{ task.editing }}">
        <button type="button" data-action="save">Save</button>
        <button type="button" data-action="cancel-edit">Cancel</button>
      {%- else %}
        <span class="task-name">{{ task.name }}</span>
        <button type="button" data-action="edit">Edit</button>
        {%- if task.confirm_delete %}
        <span class="confirm">Delete this task?</span>
        <button type="button" data-action="confirm-delete">Delete</button>
        <button type="button" data-action="cancel-delete">Keep</button>
        {%- else %}
        <button type="button" data-action="delete">Delete</button>
        {%- endif %}
      {%- endif %}
      </li>
    {%- endfor %}
    </ul>
    {%- if column.composer is not none %}
    <form class="composer" data-column="{{ column.status }}">
      <input name="task_name" value="{{ column.composer }}" autofocus>
      <button type="submit">Add</button>
      <button type="button" data-action="cancel-add">Cancel</button>
    </form>
    {%- elif column.can_add %}
    <button type="button" data-action="add" data-column="{{ column.status }}">Add task</button>
    {%- endif %}
  </section>
{%- endfor %}
</main>
"#;

/// Renders a [`BoardView`] to HTML.
///
/// All interpolated values are HTML-escaped.
///
/// # Errors
///
/// Returns [`RenderError`] when template evaluation fails.
pub fn render_board(view: &BoardView) -> Result<String, RenderError> {
    let mut environment = Environment::new();
    environment.set_auto_escape_callback(|_| AutoEscape::Html);
    Ok(environment.render_str(BOARD_TEMPLATE, view)?)
}
