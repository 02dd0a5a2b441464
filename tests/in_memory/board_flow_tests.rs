//! End-to-end board flows from sign-up to rendered markup.

use std::sync::Arc;

use super::helpers::{PASSWORD, Workspace, workspace};
use rstest::rstest;
use taskboard::board::{
    AuthMode, AuthPage, BoardController, DropOutcome, Route, render_board,
};
use taskboard::config::AppConfig;
use taskboard::session::adapters::memory::InMemoryProfileDirectory;
use taskboard::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_log_in_and_work_the_board(workspace: Workspace) -> Result<(), eyre::Report> {
    let Workspace {
        sessions, service, ..
    } = workspace;

    let mut sign_up = AuthPage::new(Arc::clone(&sessions), AuthMode::SignUp);
    sign_up.set_email("ada@example.com");
    sign_up.set_password(PASSWORD);
    eyre::ensure!(sign_up.submit().await == Some(Route::Login), "sign-up did not go to login");

    let mut login = AuthPage::new(Arc::clone(&sessions), AuthMode::Login);
    login.set_email("ada@example.com");
    login.set_password(PASSWORD);
    eyre::ensure!(login.submit().await == Some(Route::Tasks), "login did not go to the board");

    let config = AppConfig::from_vars(Vec::<(String, String)>::new())?;
    let mut board = BoardController::new(
        service,
        Arc::new(InMemoryProfileDirectory::new()),
        config.board_settings(),
    );
    board.open().await;
    eyre::ensure!(board.redirect().is_none(), "signed-in board redirected");

    board.begin_add(TaskStatus::Todo);
    board.set_add_draft("Water plants");
    eyre::ensure!(board.submit_add().await, "add failed: {:?}", board.error());
    let id = board
        .tasks()
        .first()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("added task missing"))?;

    let outcome = board
        .handle_raw_drop(&id.to_string(), "Todo", Some("Pending"))
        .await;
    eyre::ensure!(
        matches!(outcome, Some(DropOutcome::Move { to: TaskStatus::Pending, .. })),
        "unexpected drop outcome {outcome:?}"
    );

    let html = render_board(&board.view())?;
    let pending = html
        .find(r#"data-column="Pending""#)
        .ok_or_else(|| eyre::eyre!("pending column missing"))?;
    let card = html
        .find("Water plants")
        .ok_or_else(|| eyre::eyre!("card missing"))?;
    eyre::ensure!(card > pending, "card rendered outside the Pending column");

    board.sign_out().await;
    eyre::ensure!(board.take_redirect() == Some(Route::Login), "sign-out did not redirect");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_out_visitor_is_sent_to_login(workspace: Workspace) {
    let mut board = BoardController::new(
        workspace.service,
        Arc::new(InMemoryProfileDirectory::new()),
        AppConfig::default().board_settings(),
    );

    board.open().await;

    assert_eq!(board.redirect(), Some(Route::Login));
    assert_eq!(board.redirect().map(Route::path), Some("/login"));
}
