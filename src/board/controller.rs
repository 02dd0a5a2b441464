//! Board state and gesture handling.
//!
//! The controller owns the in-memory task list shown on the board. It turns
//! gestures into [`TaskService`] calls and replaces the list wholesale with
//! whatever the service returns. Failures become a user-visible message and
//! leave the list as it was.

use std::sync::Arc;

use super::{
    columns::{BoardColumn, group_by_status},
    drag::{DropEvent, DropOutcome},
    editor::{AddComposer, RowEditor, RowState},
    loading::LoadingIndicator,
    navigation::Route,
    render::{BoardView, CardView, ColumnView},
};
use crate::session::{
    domain::Session,
    ports::{ProfileDirectory, SessionStore},
};
use crate::task::{
    domain::{Task, TaskId, TaskName, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult},
};

/// Presentation settings for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    /// Avatar shown when the profile has none.
    pub default_avatar_url: String,
}

/// Stateful model behind the kanban board page.
pub struct BoardController<R, S, P>
where
    R: TaskRepository,
    S: SessionStore,
    P: ProfileDirectory,
{
    service: TaskService<R, S>,
    profiles: Arc<P>,
    settings: BoardSettings,
    session: Option<Session>,
    tasks: Vec<Task>,
    avatar_url: Option<String>,
    loading: LoadingIndicator,
    error: Option<String>,
    redirect: Option<Route>,
    composer: AddComposer,
    editor: RowEditor,
    pending_delete: Option<TaskId>,
}

impl<R, S, P> BoardController<R, S, P>
where
    R: TaskRepository,
    S: SessionStore,
    P: ProfileDirectory,
{
    /// Creates a closed board. Call [`Self::open`] before use.
    #[must_use]
    pub fn new(service: TaskService<R, S>, profiles: Arc<P>, settings: BoardSettings) -> Self {
        Self {
            service,
            profiles,
            settings,
            session: None,
            tasks: Vec::new(),
            avatar_url: None,
            loading: LoadingIndicator::default(),
            error: None,
            redirect: None,
            composer: AddComposer::default(),
            editor: RowEditor::default(),
            pending_delete: None,
        }
    }

    /// Loads the current session, the avatar, and the task list.
    ///
    /// Without a current session the board forgets whatever it showed for an
    /// earlier session and requests a redirect to [`Route::Login`]. A session
    /// for a different user also starts from an empty board.
    #[tracing::instrument(skip_all)]
    pub async fn open(&mut self) {
        self.error = None;
        match self.service.sessions().current_session().await {
            Ok(Some(session)) => {
                let same_user = self
                    .session
                    .as_ref()
                    .is_some_and(|shown| shown.user_id() == session.user_id());
                if !same_user {
                    self.clear_board();
                }
                self.load_avatar(&session).await;
                self.session = Some(session);
                self.refresh().await;
            }
            Ok(None) => {
                self.clear_board();
                self.require_login();
            }
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Re-reads the task list.
    pub async fn refresh(&mut self) {
        let Some(session) = self.active_session() else {
            return;
        };
        let in_flight = self.loading.start();
        let result = self.service.list_tasks(&session).await;
        drop(in_flight);
        self.absorb(result);
    }

    /// Opens the add composer on `column`.
    ///
    /// Returns `false` when a composer is already open on some column.
    pub const fn begin_add(&mut self, column: TaskStatus) -> bool {
        self.composer.open(column)
    }

    /// Updates the add composer's draft.
    pub fn set_add_draft(&mut self, text: impl Into<String>) {
        self.composer.set_draft(text);
    }

    /// Closes the add composer without creating anything.
    pub fn cancel_add(&mut self) {
        self.composer.cancel();
    }

    /// Submits the add composer.
    ///
    /// Blank drafts make no call. Returns `true` when a task was created.
    pub async fn submit_add(&mut self) -> bool {
        let Some((column, draft)) = self.composer.submission() else {
            return false;
        };
        let Some(session) = self.active_session() else {
            return false;
        };
        let request =
            CreateTaskRequest::new(draft, column).with_idempotency_key(self.composer.key());

        let in_flight = self.loading.start();
        let result = self.service.create_task(&session, request).await;
        drop(in_flight);
        let created = self.absorb(result);
        if created {
            self.composer.complete();
        }
        created
    }

    /// Switches the row for `id` to editing. Returns `false` for unknown ids.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter().find(|task| task.id() == id) else {
            return false;
        };
        self.editor.begin(task);
        true
    }

    /// Updates the edit draft.
    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        self.editor.set_draft(text);
    }

    /// Returns the editing row to viewing without saving.
    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Saves the edit draft as the task's new name.
    ///
    /// A blank draft sets a validation message and makes no call. Returns
    /// `true` when the rename succeeded.
    pub async fn submit_edit(&mut self) -> bool {
        let Some((id, draft)) = self
            .editor
            .current()
            .map(|(id, draft)| (id, draft.to_owned()))
        else {
            return false;
        };
        if let Err(err) = TaskName::new(draft.as_str()) {
            self.error = Some(err.to_string());
            return false;
        }
        let Some(session) = self.active_session() else {
            return false;
        };

        let in_flight = self.loading.start();
        let result = self.service.rename_task(&session, id, draft).await;
        drop(in_flight);
        let renamed = self.absorb(result);
        if renamed {
            self.editor.cancel();
        }
        renamed
    }

    /// Applies a drop gesture.
    ///
    /// Only a drop onto a different column calls the service.
    pub async fn handle_drop(&mut self, event: DropEvent) -> DropOutcome {
        let outcome = event.resolve();
        if let DropOutcome::Move { task_id, to } = outcome {
            if let Some(session) = self.active_session() {
                let in_flight = self.loading.start();
                let result = self.service.move_task(&session, task_id, to).await;
                drop(in_flight);
                self.absorb(result);
            }
        } else {
            tracing::trace!(?outcome, "drop ignored");
        }
        outcome
    }

    /// Applies a drop gesture reported with raw string ids.
    ///
    /// Malformed ids set an error message and make no call.
    pub async fn handle_raw_drop(
        &mut self,
        item_id: &str,
        source: &str,
        destination: Option<&str>,
    ) -> Option<DropOutcome> {
        match DropEvent::parse(item_id, source, destination) {
            Ok(event) => Some(self.handle_drop(event).await),
            Err(err) => {
                tracing::warn!(error = %err, "rejected malformed drop event");
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Asks for confirmation before deleting `id`.
    pub const fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    /// Withdraws a pending delete request.
    pub const fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the task awaiting confirmation.
    ///
    /// Returns `true` when the delete succeeded.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        let Some(session) = self.active_session() else {
            return false;
        };
        let in_flight = self.loading.start();
        let result = self.service.delete_task(&session, id).await;
        drop(in_flight);
        self.absorb(result)
    }

    /// Ends the session, clears the board, and redirects to login.
    #[tracing::instrument(skip_all)]
    pub async fn sign_out(&mut self) {
        if let Err(err) = self.service.sessions().sign_out().await {
            tracing::warn!(error = %err, "sign out failed");
            self.error = Some(err.to_string());
            return;
        }
        self.clear_board();
        self.error = None;
        self.require_login();
    }

    /// Returns the current task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task list grouped into board columns.
    #[must_use]
    pub fn columns(&self) -> Vec<BoardColumn> {
        group_by_status(&self.tasks)
    }

    /// Returns the row display state for `id`.
    #[must_use]
    pub fn row_state(&self, id: TaskId) -> RowState {
        self.editor.state_of(id)
    }

    /// Returns the add composer.
    #[must_use]
    pub const fn composer(&self) -> &AddComposer {
        &self.composer
    }

    /// Returns the task awaiting delete confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<TaskId> {
        self.pending_delete
    }

    /// Returns the last user-visible error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns whether a service call is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Returns a handle that observes this board's outstanding calls.
    #[must_use]
    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.loading.clone()
    }

    /// Returns the session the board is showing.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the avatar to show, falling back to the configured default.
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        self.avatar_url
            .as_deref()
            .unwrap_or(&self.settings.default_avatar_url)
    }

    /// Returns the pending redirect without consuming it.
    #[must_use]
    pub const fn redirect(&self) -> Option<Route> {
        self.redirect
    }

    /// Takes the pending redirect, if any.
    pub const fn take_redirect(&mut self) -> Option<Route> {
        self.redirect.take()
    }

    /// Builds the render model for the current state.
    #[must_use]
    pub fn view(&self) -> BoardView {
        let adding = self.composer.column();
        let columns = self
            .columns()
            .into_iter()
            .map(|column| ColumnView {
                status: column.status.as_str(),
                can_add: adding.is_none(),
                composer: (adding == Some(column.status))
                    .then(|| self.composer.draft().to_owned()),
                tasks: column
                    .tasks
                    .iter()
                    .map(|task| self.card_view(task))
                    .collect(),
            })
            .collect();

        BoardView {
            avatar_url: self.avatar_url().to_owned(),
            loading: self.is_loading(),
            error: self.error.clone(),
            columns,
        }
    }

    fn card_view(&self, task: &Task) -> CardView {
        let editing = self
            .editor
            .current()
            .filter(|(id, _)| *id == task.id())
            .map(|(_, draft)| draft.to_owned());
        CardView {
            id: task.id().to_string(),
            name: task.name().as_str().to_owned(),
            editing,
            confirm_delete: self.pending_delete == Some(task.id()),
        }
    }

    async fn load_avatar(&mut self, session: &Session) {
        match self.profiles.avatar_url(session.user_id()).await {
            Ok(url) => self.avatar_url = url,
            Err(err) => tracing::debug!(error = %err, "avatar lookup failed"),
        }
    }

    fn active_session(&mut self) -> Option<Session> {
        let session = self.session.clone();
        if session.is_none() {
            self.require_login();
        }
        session
    }

    /// Forgets everything loaded for the previous session.
    fn clear_board(&mut self) {
        self.session = None;
        self.tasks.clear();
        self.avatar_url = None;
        self.composer.cancel();
        self.editor.cancel();
        self.pending_delete = None;
    }

    const fn require_login(&mut self) {
        self.redirect = Some(Route::Login);
    }

    /// Installs a successful result or records the failure.
    fn absorb(&mut self, result: TaskServiceResult<Vec<Task>>) -> bool {
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
                true
            }
            Err(err) => {
                if matches!(err, TaskServiceError::Unauthenticated) {
                    self.session = None;
                    self.require_login();
                }
                self.error = Some(err.to_string());
                false
            }
        }
    }
}
