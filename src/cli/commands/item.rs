//! Item commands.

use super::{format_item_line, open_storage, print_json, today};
use crate::cli::ItemCommands;
use crate::error::{Error, Result};
use crate::model::{Item, NewItem};
use crate::storage::{DeletedCounts, SqliteStorage};
use crate::validate::{parse_due_date, validate_name};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Serialize)]
struct ItemOutput<'a> {
    #[serde(flatten)]
    item: &'a Item,
    project_name: Option<&'a str>,
    has_note: bool,
}

#[derive(Serialize)]
struct ItemDeleteOutput {
    id: i64,
    deleted: DeletedCounts,
}

/// Execute an item command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, an input is invalid or
/// the item/project does not exist.
pub fn execute(command: &ItemCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = open_storage(db_path)?;

    match command {
        ItemCommands::Add {
            project,
            title,
            due,
        } => execute_add(&mut storage, *project, title, due.as_deref(), json),
        ItemCommands::Show { id } => execute_show(&storage, *id, json),
        ItemCommands::Done { id } => modify(&mut storage, *id, json, |item| item.is_done = true),
        ItemCommands::Undo { id } => modify(&mut storage, *id, json, |item| item.is_done = false),
        ItemCommands::Rename { id, title } => {
            let title = validate_name("item title", title)?;
            modify(&mut storage, *id, json, |item| item.title = title)
        }
        ItemCommands::Due { id, date } => {
            let due_date = parse_due_date(date, today())?;
            modify(&mut storage, *id, json, |item| item.due_date = due_date)
        }
        ItemCommands::Move { id, project } => {
            require_project(&storage, *project)?;
            modify(&mut storage, *id, json, |item| item.project_id = *project)
        }
        ItemCommands::Delete { id } => execute_delete(&mut storage, *id, json),
    }
}

fn require_project(storage: &SqliteStorage, id: i64) -> Result<()> {
    if storage.get_project(id)?.is_none() {
        return Err(Error::ProjectNotFound { id });
    }
    Ok(())
}

fn execute_add(
    storage: &mut SqliteStorage,
    project_id: i64,
    title: &str,
    due: Option<&str>,
    json: bool,
) -> Result<()> {
    let title = validate_name("item title", title)?;
    require_project(storage, project_id)?;

    let mut new_item = NewItem::new(project_id, title);
    if let Some(due_date) = due.map(|d| parse_due_date(d, today())).transpose()?.flatten() {
        new_item = new_item.due(due_date);
    }

    let id = storage.insert(new_item)?;
    debug!(id, project_id, "Item created");

    if crate::is_silent() {
        println!("{id}");
        return Ok(());
    }

    let item = storage.get_item(id)?.ok_or(Error::ItemNotFound { id })?;
    print_item(&item, json)
}

fn execute_show(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let item = storage.get_item(id)?.ok_or(Error::ItemNotFound { id })?;
    let project = storage.get_project(item.project_id)?;
    let note = storage.get_note(id)?;

    if json {
        return print_json(&ItemOutput {
            item: &item,
            project_name: project.as_ref().map(|p| p.name.as_str()),
            has_note: note.as_ref().is_some_and(|n| !n.content.is_empty()),
        });
    }

    println!("{}", format_item_line(&item, today()));
    match project {
        Some(project) => println!("  Project: {} (#{})", project.name, project.id),
        None => println!("  Project: #{} (missing)", item.project_id),
    }
    if let Some(note) = note.filter(|n| !n.content.is_empty()) {
        println!();
        for line in note.content.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}

/// Load an item, apply `change`, and write the whole record back.
fn modify<F>(storage: &mut SqliteStorage, id: i64, json: bool, change: F) -> Result<()>
where
    F: FnOnce(&mut Item),
{
    let mut item = storage.get_item(id)?.ok_or(Error::ItemNotFound { id })?;
    change(&mut item);

    if !storage.update_item(&item)? {
        return Err(Error::ItemNotFound { id });
    }

    if crate::is_silent() {
        println!("{id}");
        return Ok(());
    }
    print_item(&item, json)
}

fn print_item(item: &Item, json: bool) -> Result<()> {
    if json {
        print_json(item)
    } else {
        println!("{}", format_item_line(item, today()));
        Ok(())
    }
}

fn execute_delete(storage: &mut SqliteStorage, id: i64, json: bool) -> Result<()> {
    let deleted = storage.delete_item(id)?;
    if deleted.items == 0 {
        return Err(Error::ItemNotFound { id });
    }

    if json {
        print_json(&ItemDeleteOutput { id, deleted })
    } else {
        println!("Deleted item {id}");
        Ok(())
    }
}
