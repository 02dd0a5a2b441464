//! Task service behaviour with the Diesel repository underneath.

use std::sync::Arc;

use super::helpers::{TaskDatabase, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use taskboard::session::{
    adapters::memory::InMemorySessionStore, domain::Credentials, ports::SessionStore,
};
use taskboard::task::{
    domain::{IdempotencyKey, TaskStatus},
    services::{CreateTaskRequest, TaskService, TaskServiceError},
};

#[rstest]
fn board_lifecycle_round_trips_through_the_database(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TaskDatabase::create(shared_test_cluster, "service_lifecycle")?;
    let sessions = Arc::new(InMemorySessionStore::new());
    let service = TaskService::new(Arc::new(db.repository()?), Arc::clone(&sessions));
    let rt = test_runtime()?;
    let session =
        rt.block_on(sessions.sign_up(&Credentials::parse("ada@example.com", "correct horse")?))?;
    let key = IdempotencyKey::new();
    let request = CreateTaskRequest::new("Buy milk", TaskStatus::Todo).with_idempotency_key(key);

    let created = rt.block_on(service.create_task(&session, request.clone()))?;
    let retried = rt.block_on(service.create_task(&session, request))?;
    assert_eq!(retried, created);
    let [task] = created.as_slice() else {
        return Err(eyre::eyre!("expected one task, got {}", created.len()));
    };
    let id = task.id();

    let moved = rt.block_on(service.move_task(&session, id, TaskStatus::Done))?;
    assert!(moved.iter().any(|t| t.id() == id && t.status() == TaskStatus::Done));
    let renamed = rt.block_on(service.rename_task(&session, id, "Buy oat milk"))?;
    assert!(
        renamed
            .iter()
            .any(|t| t.id() == id && t.name().as_str() == "Buy oat milk" && t.status() == TaskStatus::Done)
    );
    let remaining = rt.block_on(service.delete_task(&session, id))?;
    assert!(remaining.is_empty());
    Ok(())
}

#[rstest]
fn signed_out_mutations_leave_the_table_untouched(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TaskDatabase::create(shared_test_cluster, "service_signed_out")?;
    let sessions = Arc::new(InMemorySessionStore::new());
    let service = TaskService::new(Arc::new(db.repository()?), Arc::clone(&sessions));
    let rt = test_runtime()?;
    let session =
        rt.block_on(sessions.sign_up(&Credentials::parse("ada@example.com", "correct horse")?))?;
    rt.block_on(sessions.sign_out())?;

    let result = rt.block_on(
        service.create_task(&session, CreateTaskRequest::new("Sneaky", TaskStatus::Todo)),
    );
    assert!(matches!(result, Err(TaskServiceError::Unauthenticated)));

    let resumed =
        rt.block_on(sessions.sign_in(&Credentials::parse("ada@example.com", "correct horse")?))?;
    assert!(rt.block_on(service.list_tasks(&resumed))?.is_empty());
    Ok(())
}
