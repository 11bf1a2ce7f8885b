//! Sum type for the generic insert operations.

use super::{NewItem, NewItemNote, NewProject, Setting};

/// Any record the storage layer can create.
///
/// `SqliteStorage::insert` and `insert_many` accept anything convertible
/// into a `Record`, so batches may mix kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Setting(Setting),
    Project(NewProject),
    Item(NewItem),
    ItemNote(NewItemNote),
}

impl Record {
    /// Table-level name used in log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Setting(_) => "setting",
            Self::Project(_) => "project",
            Self::Item(_) => "item",
            Self::ItemNote(_) => "item_note",
        }
    }
}

impl From<Setting> for Record {
    fn from(setting: Setting) -> Self {
        Self::Setting(setting)
    }
}

impl From<NewProject> for Record {
    fn from(project: NewProject) -> Self {
        Self::Project(project)
    }
}

impl From<NewItem> for Record {
    fn from(item: NewItem) -> Self {
        Self::Item(item)
    }
}

impl From<NewItemNote> for Record {
    fn from(note: NewItemNote) -> Self {
        Self::ItemNote(note)
    }
}
