//! Task entity: a unit of work with a board-scoped sequence number.

use super::{BoardId, Checklist, ColumnId, DomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Unit of work owned by exactly one column.
///
/// The `number` is a dense per-board sequence assigned once at creation;
/// it survives column moves and full replaces unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    board_id: BoardId,
    column_id: ColumnId,
    number: i64,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    checklists: Vec<Checklist>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Mutable task content supplied at creation and on full replace.
///
/// Foreign-key membership (the column belonging to the board) is checked
/// by the calling service, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning column.
    pub column_id: ColumnId,
    /// Owning board.
    pub board_id: BoardId,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Tags, order preserved for display.
    pub tags: Vec<String>,
    /// Ordered checklists.
    pub checklists: Vec<Checklist>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning board identifier.
    pub board_id: BoardId,
    /// Owning column identifier.
    pub column_id: ColumnId,
    /// Persisted per-board task number.
    pub number: i64,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted checklists.
    pub checklists: Vec<Checklist>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted deletion tombstone, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task from allocator-assigned `number` and its content.
    #[must_use]
    pub fn new(number: i64, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            board_id: draft.board_id,
            column_id: draft.column_id,
            number,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            checklists: draft.checklists,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            column_id: data.column_id,
            number: data.number,
            title: data.title,
            description: data.description,
            tags: data.tags,
            checklists: data.checklists,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning column identifier.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the board-scoped task number.
    #[must_use]
    pub const fn number(&self) -> i64 {
        self.number
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the task checklists.
    #[must_use]
    pub fn checklists(&self) -> &[Checklist] {
        &self.checklists
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the deletion tombstone, if the task is deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the task carries no deletion tombstone.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Replaces all mutable fields in place and bumps `updated_at`.
    ///
    /// The task number is not part of the draft: it is assigned once at
    /// creation and never changes.
    pub fn update(&mut self, draft: TaskDraft, clock: &impl Clock) {
        self.column_id = draft.column_id;
        self.board_id = draft.board_id;
        self.title = draft.title;
        self.description = draft.description;
        self.tags = draft.tags;
        self.checklists = draft.checklists;
        self.touch(clock);
    }

    /// Relocates the task to another column of its board.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AlreadyInColumn`] when the target equals the
    /// current column.
    pub fn move_to_column(
        &mut self,
        column_id: ColumnId,
        clock: &impl Clock,
    ) -> Result<(), DomainError> {
        if self.column_id == column_id {
            return Err(DomainError::AlreadyInColumn(column_id));
        }
        self.column_id = column_id;
        self.touch(clock);
        Ok(())
    }

    /// Marks the task deleted at the current clock time.
    pub fn delete(&mut self, clock: &impl Clock) {
        self.deleted_at = Some(clock.utc());
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
