//! Checklist value objects embedded in tasks.

use serde::{Deserialize, Serialize};

/// Named sub-list of completable items attached to a task.
///
/// Checklists carry no identity of their own; they are persisted as part
/// of the owning task's single structured blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Checklist title.
    pub title: String,
    /// Ordered checklist items.
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Creates a checklist from a title and its items.
    #[must_use]
    pub fn new(title: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

/// Single completable entry inside a [`Checklist`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Item title.
    pub title: String,
    /// Whether the item has been completed.
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates a checklist item.
    #[must_use]
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}
