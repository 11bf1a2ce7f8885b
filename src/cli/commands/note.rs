//! Note commands.
//!
//! Every item has at most one note. `note show` creates an empty one on first
//! access; `note set` replaces the content of the item's note.

use super::{open_storage, print_json};
use crate::cli::NoteCommands;
use crate::error::{Error, Result};
use crate::model::ItemNote;
use crate::storage::SqliteStorage;
use std::path::PathBuf;
use tracing::debug;

/// Execute a note command.
///
/// # Errors
///
/// Returns `ItemNotFound` if the item does not exist, or an error if the
/// store cannot be opened or written.
pub fn execute(command: &NoteCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = open_storage(db_path)?;

    match command {
        NoteCommands::Show { item } => {
            let note = note_for_item(&mut storage, *item)?;
            print_note(&note, json)
        }
        NoteCommands::Set { item, content } => {
            let mut note = note_for_item(&mut storage, *item)?;
            note.content.clone_from(content);
            if !storage.update_note(&note)? {
                return Err(Error::Other(format!("note {} vanished during update", note.id)));
            }
            debug!(note_id = note.id, item_id = note.item_id, "Note updated");

            if crate::is_silent() {
                println!("{}", note.id);
                return Ok(());
            }
            print_note(&note, json)
        }
    }
}

fn note_for_item(storage: &mut SqliteStorage, item_id: i64) -> Result<ItemNote> {
    // The store would happily attach a note to a missing item
    if storage.get_item(item_id)?.is_none() {
        return Err(Error::ItemNotFound { id: item_id });
    }
    storage.get_or_create_note(item_id)
}

fn print_note(note: &ItemNote, json: bool) -> Result<()> {
    if json {
        return print_json(note);
    }
    if note.content.is_empty() {
        println!("(empty note)");
    } else {
        println!("{}", note.content);
    }
    Ok(())
}
