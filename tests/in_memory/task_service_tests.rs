//! Session-scoped task service behaviour over in-memory adapters.

use super::helpers::{Workspace, find, sign_in, sign_up, workspace};
use rstest::rstest;
use taskboard::session::ports::SessionStore;
use taskboard::task::{
    domain::{IdempotencyKey, TaskStatus},
    ports::TaskRepositoryError,
    services::{CreateTaskRequest, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lists_only_the_owners_tasks_in_creation_order(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace {
        sessions, service, ..
    } = workspace;

    let ada = sign_up(&sessions, "ada@example.com").await?;
    for name in ["first", "second", "third"] {
        service
            .create_task(&ada, CreateTaskRequest::new(name, TaskStatus::Todo))
            .await?;
    }
    let grace = sign_up(&sessions, "grace@example.com").await?;
    let graces = service
        .create_task(&grace, CreateTaskRequest::new("compile", TaskStatus::Done))
        .await?;
    eyre::ensure!(graces.len() == 1, "grace sees {} tasks", graces.len());

    let resumed = sign_in(&sessions, "ada@example.com").await?;
    let listed = service.list_tasks(&resumed).await?;

    let names: Vec<_> = listed.iter().map(|task| task.name().as_str()).collect();
    eyre::ensure!(names == ["first", "second", "third"], "unexpected order {names:?}");
    eyre::ensure!(
        listed.iter().all(|task| task.owner_id() == resumed.user_id()),
        "list leaked another owner's task"
    );
    eyre::ensure!(
        listed.is_sorted_by_key(|task| task.created_at()),
        "list is not ordered by creation time"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_appears_exactly_once(workspace: Workspace) -> Result<(), eyre::Report> {
    let session = sign_up(&workspace.sessions, "ada@example.com").await?;

    workspace
        .service
        .create_task(&session, CreateTaskRequest::new("Buy milk", TaskStatus::Todo))
        .await?;
    let listed = workspace.service.list_tasks(&session).await?;

    let matching: Vec<_> = listed
        .iter()
        .filter(|task| task.name().as_str() == "Buy milk" && task.status() == TaskStatus::Todo)
        .collect();
    eyre::ensure!(matching.len() == 1, "found {} matches", matching.len());
    eyre::ensure!(
        matching.iter().all(|task| task.owner_id() == session.user_id()),
        "task not owned by the session user"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_rename_and_delete_touch_only_their_field(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace {
        sessions, service, ..
    } = workspace;
    let session = sign_up(&sessions, "ada@example.com").await?;
    let created = service
        .create_task(&session, CreateTaskRequest::new("Draft", TaskStatus::Todo))
        .await?;
    let id = created
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("created task missing"))?;

    let moved = service.move_task(&session, id, TaskStatus::Done).await?;
    let moved_task = find(&moved, id)?;
    eyre::ensure!(moved_task.status() == TaskStatus::Done, "status not updated");
    eyre::ensure!(moved_task.name().as_str() == "Draft", "move changed the name");

    let renamed = service.rename_task(&session, id, "New name").await?;
    let renamed_task = find(&renamed, id)?;
    eyre::ensure!(renamed_task.name().as_str() == "New name", "name not updated");
    eyre::ensure!(
        renamed_task.status() == TaskStatus::Done,
        "rename changed the status"
    );

    let remaining = service.delete_task(&session, id).await?;
    eyre::ensure!(
        remaining.iter().all(|task| task.id() != id),
        "deleted task still listed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_out_mutations_fail_without_side_effects(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let Workspace {
        repository,
        sessions,
        service,
    } = workspace;
    let session = sign_up(&sessions, "ada@example.com").await?;
    let created = service
        .create_task(&session, CreateTaskRequest::new("Keep", TaskStatus::Pending))
        .await?;
    let id = created
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("created task missing"))?;
    sessions.sign_out().await?;

    let results = [
        service
            .create_task(&session, CreateTaskRequest::new("Nope", TaskStatus::Todo))
            .await,
        service.rename_task(&session, id, "Nope").await,
        service.move_task(&session, id, TaskStatus::Done).await,
        service.delete_task(&session, id).await,
    ];
    for result in results {
        eyre::ensure!(
            matches!(result, Err(TaskServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }

    eyre::ensure!(repository.row_count()? == 1, "repository was modified");
    let resumed = sign_in(&sessions, "ada@example.com").await?;
    let listed = service.list_tasks(&resumed).await?;
    let task = find(&listed, id)?;
    eyre::ensure!(
        task.name().as_str() == "Keep" && task.status() == TaskStatus::Pending,
        "task changed while signed out"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_create_with_one_key_stores_one_row(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let session = sign_up(&workspace.sessions, "ada@example.com").await?;
    let key = IdempotencyKey::new();

    for _ in 0..3 {
        workspace
            .service
            .create_task(
                &session,
                CreateTaskRequest::new("Once", TaskStatus::Todo).with_idempotency_key(key),
            )
            .await?;
    }

    eyre::ensure!(workspace.repository.row_count()? == 1, "duplicate rows stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn another_users_task_is_not_found(workspace: Workspace) -> Result<(), eyre::Report> {
    let Workspace {
        sessions, service, ..
    } = workspace;
    let ada = sign_up(&sessions, "ada@example.com").await?;
    let created = service
        .create_task(&ada, CreateTaskRequest::new("Private", TaskStatus::Todo))
        .await?;
    let id = created
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("created task missing"))?;

    let grace = sign_up(&sessions, "grace@example.com").await?;
    let result = service.delete_task(&grace, id).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(missing))) if missing == id
        ),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}
