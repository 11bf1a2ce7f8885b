//! Configuration management.
//!
//! Liatris keeps everything in one database file per user. This module only
//! decides *where* that file lives; the storage layer takes the resolved path
//! as an argument and never looks anything up itself.

use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const DB_ENV: &str = "LIATRIS_DB";

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "liatris.db";

/// Platform data directory for Liatris.
///
/// `~/.local/share/liatris` on Linux, `~/Library/Application Support/liatris`
/// on macOS, `%APPDATA%\liatris\data` on Windows. Falls back to `~/.liatris`
/// when the platform directories cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "liatris")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .or_else(|| directories::BaseDirs::new().map(|b| b.home_dir().join(".liatris")))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly (the `--db` flag; clap
///    also fills it from `LIATRIS_DB`)
/// 2. `LIATRIS_DB` environment variable (for library callers without clap)
/// 3. `<data_dir>/liatris.db`
///
/// # Returns
///
/// Returns the path to the database file, or `None` if no location found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(db_path) = std::env::var(DB_ENV) {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    data_dir().map(|dir| dir.join(DB_FILE_NAME))
}
