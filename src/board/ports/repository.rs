//! Repository port for board, column, and task persistence.

use crate::board::domain::{Board, BoardId, Column, ColumnId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Hard cap on the number of rows a single search may return.
pub const MAX_PAGE_SIZE: u32 = 25;

/// Composed search filter for tasks.
///
/// Three independent predicates: tag containment (the task's tags must be
/// a superset of the requested set; empty set means no filter),
/// case-insensitive title substring (empty string means no filter), and
/// the always-applied soft-delete filter (task and owning board active).
/// Results are ordered by task creation time, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSearch {
    tags: Vec<String>,
    title: String,
    limit: u32,
    offset: u32,
}

impl TaskSearch {
    /// Creates a search filter, clamping the page size.
    ///
    /// A requested limit of 0, or anything above [`MAX_PAGE_SIZE`], falls
    /// back to [`MAX_PAGE_SIZE`]. The offset is caller-controlled with no
    /// upper bound.
    #[must_use]
    pub fn new(tags: Vec<String>, title: impl Into<String>, limit: u32, offset: u32) -> Self {
        let clamped = if limit == 0 || limit > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            limit
        };
        Self {
            tags,
            title: title.into(),
            limit: clamped,
            offset,
        }
    }

    /// Returns the requested tag set.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the title substring filter.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the clamped page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the page offset.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

/// Persistence contract for the board aggregate.
///
/// Fetches surface **active rows only**: a soft-deleted entity is
/// indistinguishable from a missing one through this interface. Writes
/// that target a missing or already-deleted row fail with
/// [`RepositoryError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board together with its default column, atomically.
    async fn insert_board(&self, board: &Board, default_column: &Column) -> RepositoryResult<()>;

    /// Stores a new column.
    async fn insert_column(&self, column: &Column) -> RepositoryResult<()>;

    /// Stores a new task.
    async fn insert_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing column.
    async fn update_column(&self, column: &Column) -> RepositoryResult<()>;

    /// Persists changes to an existing task.
    async fn update_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists a tombstoned board and soft-deletes its active columns and
    /// tasks in the same atomic unit of work.
    ///
    /// The board must already carry a deletion timestamp; the same
    /// timestamp is applied to every cascaded row.
    async fn delete_board_cascade(&self, board: &Board) -> RepositoryResult<()>;

    /// Finds an active board by identifier.
    async fn find_board(&self, id: BoardId) -> RepositoryResult<Option<Board>>;

    /// Finds an active column by identifier.
    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<Column>>;

    /// Finds an active task by identifier.
    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns all active boards, most recently updated first.
    async fn list_boards(&self) -> RepositoryResult<Vec<Board>>;

    /// Returns the board's active columns in display order.
    async fn list_columns(&self, board_id: BoardId) -> RepositoryResult<Vec<Column>>;

    /// Returns the board's active tasks in numbering order.
    async fn list_tasks(&self, board_id: BoardId) -> RepositoryResult<Vec<Task>>;

    /// Returns `true` when an active board with this identifier exists.
    async fn board_active(&self, id: BoardId) -> RepositoryResult<bool>;

    /// Returns `true` when an active board already uses this short name.
    async fn short_name_taken(&self, short_name: &str) -> RepositoryResult<bool>;

    /// Returns `true` when the column is active and belongs to the active
    /// board.
    async fn column_in_board(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
    ) -> RepositoryResult<bool>;

    /// Returns `true` when the column still owns at least one active task.
    async fn column_has_active_tasks(&self, column_id: ColumnId) -> RepositoryResult<bool>;

    /// Returns the highest `order_num` among the board's active columns,
    /// or `None` when the board has none.
    async fn max_column_order(&self, board_id: BoardId) -> RepositoryResult<Option<i64>>;

    /// Returns the highest task number on the board, or `None` when the
    /// board has no active tasks.
    async fn max_task_number(&self, board_id: BoardId) -> RepositoryResult<Option<i64>>;

    /// Returns the page of active tasks matching the composed filter.
    async fn search_tasks(&self, search: &TaskSearch) -> RepositoryResult<Vec<Task>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The write target does not exist or is already soft-deleted.
    #[error("entity not found or deleted: {0}")]
    NotFound(Uuid),

    /// The in-flight operation was cancelled before completing.
    #[error("operation canceled")]
    Canceled,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
