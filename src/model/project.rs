//! Project model for Liatris.
//!
//! Projects are named top-level containers for items. A project row with a
//! NULL name is a phantom; the storage layer never hands one out, so a
//! `Project` value always carries a name.

use super::Item;
use serde::{Deserialize, Serialize};

/// A project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Auto-assigned row id
    pub id: i64,

    /// Display name
    pub name: String,
}

/// A project that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A project paired with the items that belong to it.
///
/// Built on demand by the storage layer; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWithItems {
    pub project: Project,
    pub items: Vec<Item>,
}

impl ProjectWithItems {
    #[must_use]
    pub fn new(project: Project, items: Vec<Item>) -> Self {
        Self { project, items }
    }

    /// Completion progress as `(done, total)`.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let done = self.items.iter().filter(|item| item.is_done).count();
        (done, self.items.len())
    }

    /// True if every item is done (and there is at least one).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let (done, total) = self.progress();
        total > 0 && done == total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, is_done: bool) -> Item {
        Item {
            id,
            project_id: 1,
            is_done,
            title: format!("item {id}"),
            due_date: None,
        }
    }

    #[test]
    fn test_progress() {
        let project = Project {
            id: 1,
            name: "Home".to_string(),
        };
        let group = ProjectWithItems::new(project, vec![item(1, true), item(2, false), item(3, true)]);

        assert_eq!(group.progress(), (2, 3));
        assert!(!group.is_complete());
    }

    #[test]
    fn test_empty_project_is_not_complete() {
        let project = Project {
            id: 1,
            name: "Empty".to_string(),
        };
        let group = ProjectWithItems::new(project, Vec::new());

        assert_eq!(group.progress(), (0, 0));
        assert!(!group.is_complete());
    }
}
