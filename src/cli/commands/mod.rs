//! Command implementations.
//!
//! Every command opens the store through [`open_storage`], which also makes
//! sure the required settings exist.

pub mod completions;
pub mod item;
pub mod note;
pub mod project;
pub mod search;
pub mod settings;
pub mod status;
pub mod version;
pub mod view;

use crate::config::resolve_db_path;
use crate::defaults::ensure_defaults;
use crate::error::{Error, Result};
use crate::model::{Item, ProjectWithItems};
use crate::storage::SqliteStorage;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Resolve, open and bootstrap the store.
///
/// # Errors
///
/// Returns `Config` if no location can be determined, `StorageUnavailable`
/// if the store cannot be opened, or a database error from the bootstrap.
pub fn open_storage(db_path: Option<&PathBuf>) -> Result<SqliteStorage> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path))
        .ok_or_else(|| Error::Config("Could not determine a data directory".to_string()))?;

    let mut storage = SqliteStorage::open(&db_path)?;
    ensure_defaults(&mut storage)?;
    Ok(storage)
}

/// Today's date in local time.
#[must_use]
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print a value as one line of JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// One human-readable line for an item.
#[must_use]
pub fn format_item_line(item: &Item, today: chrono::NaiveDate) -> String {
    let check = if item.is_done { "[x]" } else { "[ ]" };
    let mut line = format!("{check} {:>4}  {}", item.id, item.title);

    if let Some(due) = item.due_day() {
        let label = due.format("%Y-%m-%d").to_string();
        let label = if item.is_done {
            label.dimmed()
        } else if due < today {
            label.red()
        } else if due == today {
            label.yellow()
        } else {
            label.normal()
        };
        line.push_str(&format!("  {label}"));
    }

    if item.is_done {
        line.dimmed().to_string()
    } else {
        line
    }
}

#[derive(Serialize)]
struct GroupListOutput<'a> {
    title: &'a str,
    projects: &'a [ProjectWithItems],
    item_count: usize,
}

/// Print projects with their items under a heading.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_groups(title: &str, groups: &[ProjectWithItems], json: bool) -> Result<()> {
    let item_count = groups.iter().map(|g| g.items.len()).sum();

    if json {
        return print_json(&GroupListOutput {
            title,
            projects: groups,
            item_count,
        });
    }

    if groups.is_empty() {
        println!("{title}: nothing here.");
        return Ok(());
    }

    println!("{} ({item_count})", title.cyan().bold());
    let today = today();
    for group in groups {
        println!();
        println!("{} {}", format!("#{}", group.project.id).dimmed(), group.project.name.bold());
        for item in &group.items {
            println!("  {}", format_item_line(item, today));
        }
    }

    Ok(())
}
