//! `liatris version`: package version plus where the store would live.

use super::print_json;
use crate::config::resolve_db_path;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct AboutOutput {
    name: &'static str,
    version: &'static str,
    debug_build: bool,
    database: Option<PathBuf>,
    database_exists: bool,
}

/// Print the version and the resolved database path.
///
/// The store is not opened, so this works before first use and never
/// creates the file.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let database = resolve_db_path(db_path.map(PathBuf::as_path));
    let about = AboutOutput {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        debug_build: cfg!(debug_assertions),
        database_exists: database.as_deref().is_some_and(std::path::Path::exists),
        database,
    };

    if json {
        return print_json(&about);
    }

    let flavor = if about.debug_build { " (debug)" } else { "" };
    println!("{} {}{flavor}", about.name, about.version);
    match &about.database {
        Some(path) if about.database_exists => println!("database: {}", path.display()),
        Some(path) => println!("database: {} (not created yet)", path.display()),
        None => println!("database: no data directory available"),
    }
    Ok(())
}
