//! Error types for Liatris.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Storage lookups report "not found" as `Ok(None)`, never as an error, so a
//! caller can always tell a missing record from a broken database.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Liatris operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    StorageUnavailable,
    DatabaseError,

    // Not Found (exit 3)
    ProjectNotFound,
    ItemNotFound,
    SettingNotFound,

    // Validation (exit 4)
    InvalidArgument,
    NoteRelink,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::SettingNotFound => "SETTING_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NoteRelink => "NOTE_RELINK",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StorageUnavailable | Self::DatabaseError => 2,
            Self::ProjectNotFound | Self::ItemNotFound | Self::SettingNotFound => 3,
            Self::InvalidArgument | Self::NoteRelink => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether retrying with corrected input can succeed.
    ///
    /// Writes are never retried by the storage layer itself.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::NoteRelink | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Liatris operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable at {}: {reason}", .path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: i64 },

    #[error("Item not found: {id}")]
    ItemNotFound { id: i64 },

    #[error("Setting not found: {key}")]
    SettingNotFound {
        key: String,
        /// Closest known keys for hint display.
        similar: Vec<String>,
    },

    #[error("Note {note_id} belongs to item {owner}, cannot attach it to item {item_id}")]
    NoteRelink { note_id: i64, owner: i64, item_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::SettingNotFound { .. } => ErrorCode::SettingNotFound,
            Self::NoteRelink { .. } => ErrorCode::NoteRelink,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::StorageUnavailable { path, .. } => Some(format!(
                "Check that {} is writable, or pass another location with --db / LIATRIS_DB.",
                path.display()
            )),

            Self::ProjectNotFound { id } => Some(format!(
                "No project with ID {id}. Use `liatris project list` to see available projects."
            )),

            Self::ItemNotFound { id } => Some(format!(
                "No item with ID {id}. Use `liatris project show <id>` to list a project's items."
            )),

            Self::SettingNotFound { similar, .. } if !similar.is_empty() => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }
            Self::SettingNotFound { .. } => {
                Some("Use `liatris settings list` to see available settings.".to_string())
            }

            Self::NoteRelink { .. } => {
                Some("Notes stay attached to the item they were created for.".to_string())
            }

            Self::InvalidArgument(msg) => {
                if msg.contains("date") {
                    Some("Dates: YYYY-MM-DD, today, tomorrow, +Nd, or none to clear".to_string())
                } else if msg.contains("flag") {
                    Some("Flags: on/off, yes/no, true/false, 1/0".to_string())
                } else {
                    None
                }
            }

            Self::Database(_) | Self::Io(_) | Self::Json(_) | Self::Config(_) | Self::Other(_) => {
                None
            }
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        let unavailable = Error::StorageUnavailable {
            path: PathBuf::from("/nope/liatris.db"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(unavailable.exit_code(), 2);
        assert_eq!(Error::ItemNotFound { id: 4 }.exit_code(), 3);
        assert_eq!(Error::InvalidArgument("x".to_string()).exit_code(), 4);
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::ProjectNotFound { id: 12 };
        let json = err.to_structured_json();

        assert_eq!(json["error"]["code"], "PROJECT_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert!(json["error"]["hint"].as_str().unwrap().contains("12"));
    }

    #[test]
    fn test_setting_hint_suggests_similar() {
        let err = Error::SettingNotFound {
            key: "ENABLENUM".to_string(),
            similar: vec!["ENABLENUMS".to_string()],
        };
        assert_eq!(err.hint().as_deref(), Some("Did you mean: ENABLENUMS?"));
    }
}
