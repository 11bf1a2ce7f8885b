//! Item search command.

use super::{open_storage, print_groups};
use crate::error::Result;
use std::path::PathBuf;

/// Search items by title or due date and print the matches per project.
///
/// The words are joined and re-tokenized by the store, so quoting does not
/// change the result.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
pub fn execute(query: &[String], db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let groups = storage.search_items(&query.join(" "))?;
    print_groups("Search results", &groups, json)
}
