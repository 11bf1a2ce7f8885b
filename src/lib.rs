//! Liatris - Personal task manager
//!
//! This crate provides the persistence and query layer behind the `liatris`
//! CLI: projects, items with optional due dates, one note per item, and a
//! small key/value settings table, all in a single SQLite file.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Setting, Project, Item, ItemNote)
//! - [`storage`] - SQLite database layer and search
//! - [`defaults`] - Required settings and typed preferences
//! - [`agenda`] - Today / Upcoming / Someday / Logbook views
//! - [`config`] - Database location
//! - [`validate`] - Input parsing for the CLI
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agenda;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};

/// Global silent mode flag for `--silent` output.
///
/// When set, create/mutate commands print only the ID instead of full
/// output. Avoids threading a `silent` bool through every handler signature.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}
