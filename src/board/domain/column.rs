//! Column entity: an ordered lane within a board.

use super::{BoardId, ColumnId, DomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Ordered lane within a board holding tasks.
///
/// The owning board never changes after creation; `order_num` is a dense
/// per-board sequence starting at 0, computed by the ordering allocator
/// before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    name: String,
    order_num: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Owning board identifier.
    pub board_id: BoardId,
    /// Persisted column name.
    pub name: String,
    /// Persisted per-board order.
    pub order_num: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted deletion tombstone, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Column {
    /// Creates a new column under the given board.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyColumnName`] when the name is blank.
    pub fn new(
        board_id: BoardId,
        name: &str,
        order_num: i64,
        clock: &impl Clock,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyColumnName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ColumnId::new(),
            board_id,
            name: name.to_owned(),
            order_num,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            name: data.name,
            order_num: data.order_num,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the per-board order of this column.
    #[must_use]
    pub const fn order_num(&self) -> i64 {
        self.order_num
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

    /// Returns the deletion tombstone, if the column is deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the column carries no deletion tombstone.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Marks the column deleted at the current clock time.
    pub fn delete(&mut self, clock: &impl Clock) {
        self.deleted_at = Some(clock.utc());
    }
}
