//! Then steps for kanban board scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::board::{BoardColumn, DropOutcome};
use taskboard::task::domain::TaskStatus;

fn column(world: &BoardWorld, name: &str) -> Result<BoardColumn, eyre::Report> {
    let status = TaskStatus::try_from(name)?;
    world
        .board
        .columns()
        .into_iter()
        .find(|column| column.status == status)
        .ok_or_else(|| eyre::eyre!("column {name} missing"))
}

#[then(r#"the "{column_name}" column lists "{name}""#)]
fn column_lists(world: &BoardWorld, column_name: String, name: String) -> Result<(), eyre::Report> {
    let found = column(world, &column_name)?;
    if !found.tasks.iter().any(|task| task.name().as_str() == name) {
        return Err(eyre::eyre!(
            "{name:?} not in {column_name}; board error: {:?}",
            world.board.error()
        ));
    }
    Ok(())
}

#[then(r#"the "{column_name}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column_name: String) -> Result<(), eyre::Report> {
    let found = column(world, &column_name)?;
    if !found.tasks.is_empty() {
        return Err(eyre::eyre!(
            "{column_name} still holds {} tasks",
            found.tasks.len()
        ));
    }
    Ok(())
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.last_drop != Some(DropOutcome::SameColumn) {
        return Err(eyre::eyre!("expected SameColumn, got {:?}", world.last_drop));
    }
    Ok(())
}

#[then(r#"the board redirects to "{path}""#)]
fn board_redirects(world: &BoardWorld, path: String) -> Result<(), eyre::Report> {
    let actual = world.board.redirect().map(|route| route.path());
    if actual != Some(path.as_str()) {
        return Err(eyre::eyre!("expected redirect to {path}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the board shows an error containing "{text}""#)]
fn board_shows_error(world: &BoardWorld, text: String) -> Result<(), eyre::Report> {
    match world.board.error() {
        Some(message) if message.contains(text.as_str()) => Ok(()),
        other => Err(eyre::eyre!("expected error containing {text:?}, got {other:?}")),
    }
}
