//! Agenda view command.

use super::{open_storage, print_groups, today};
use crate::agenda::{self, AgendaView};
use crate::defaults::Preferences;
use crate::error::Result;
use std::path::PathBuf;

/// Print one agenda view.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
pub fn execute(view: AgendaView, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let prefs = Preferences::load(&storage)?;
    let groups = storage.get_all_projects_with_items()?;

    let filtered = agenda::filter(groups, view, today(), prefs.upcoming_days);
    print_groups(view.title(), &filtered, json)
}
