//! Free-text notes attached 1:1 to items.

use serde::{Deserialize, Serialize};

/// A note attached to exactly one item.
///
/// `item_id` is fixed once the note exists; updates only rewrite `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNote {
    pub id: i64,
    pub item_id: i64,
    pub content: String,
}

/// A note that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItemNote {
    pub item_id: i64,
    pub content: String,
}

impl NewItemNote {
    /// An empty note for `item_id`.
    #[must_use]
    pub fn empty(item_id: i64) -> Self {
        Self {
            item_id,
            content: String::new(),
        }
    }
}
