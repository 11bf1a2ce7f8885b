//! Item model for Liatris.
//!
//! Items are actionable entries with a completion flag and an optional due
//! date. They reference their project by id only; no constraint enforces
//! that the project exists.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An item belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Auto-assigned row id
    pub id: i64,

    /// Owning project (not enforced by the schema)
    pub project_id: i64,

    /// Completion state
    pub is_done: bool,

    /// Title shown in lists
    pub title: String,

    /// Optional deadline
    pub due_date: Option<NaiveDateTime>,
}

impl Item {
    /// Calendar date of the deadline, if any.
    #[must_use]
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|dt| dt.date())
    }

    /// Due date rendered as `YYYY-MM-DD`, the form that item search matches against.
    #[must_use]
    pub fn due_day_string(&self) -> Option<String> {
        self.due_day().map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// An item that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub project_id: i64,
    pub is_done: bool,
    pub title: String,
    pub due_date: Option<NaiveDateTime>,
}

impl NewItem {
    /// An open item without a deadline.
    pub fn new(project_id: i64, title: impl Into<String>) -> Self {
        Self {
            project_id,
            is_done: false,
            title: title.into(),
            due_date: None,
        }
    }

    #[must_use]
    pub fn due(mut self, due_date: NaiveDateTime) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }
}
