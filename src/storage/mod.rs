//! SQLite storage layer for Liatris.
//!
//! This module provides the persistence layer using SQLite with:
//! - One owned connection per store, passed explicitly to callers
//! - Table creation on open (no migrations)
//! - Transaction discipline for atomic writes and cascading deletes
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`search`] - Pure matching and de-duplication helpers
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod search;
pub mod sqlite;

pub use sqlite::{DeletedCounts, SqliteStorage};
