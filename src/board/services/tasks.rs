//! Task lifecycle service: creation, relocation, replace, search.

use super::error::{parse_id, OpsError, OpsResult, ValidationError};
use super::ordering;
use crate::board::domain::{BoardId, Checklist, ColumnId, Task, TaskDraft, TaskId};
use crate::board::ports::{BoardRepository, TaskSearch};
use mockable::Clock;
use std::sync::Arc;

const MAX_TITLE_CHARS: usize = 255;

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let chars = title.chars().count();
    if chars == 0 || chars > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleLength(chars));
    }
    Ok(())
}

/// Request payload for creating a task under an existing column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    checklists: Vec<Checklist>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for a malformed identifier
    /// and [`ValidationError::TitleLength`] for an out-of-range title.
    pub fn new(
        board_id: &str,
        column_id: &str,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title_value = title.into();
        validate_title(&title_value)?;
        Ok(Self {
            board_id: BoardId::from_uuid(parse_id("board_id", board_id)?),
            column_id: ColumnId::from_uuid(parse_id("column_id", column_id)?),
            title: title_value,
            description: None,
            tags: Vec::new(),
            checklists: Vec::new(),
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the task checklists.
    #[must_use]
    pub fn with_checklists(mut self, checklists: impl IntoIterator<Item = Checklist>) -> Self {
        self.checklists = checklists.into_iter().collect();
        self
    }

    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            column_id: self.column_id,
            board_id: self.board_id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            checklists: self.checklists,
        }
    }
}

/// Request payload for relocating a task to another column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    column_id: ColumnId,
}

impl MoveTaskRequest {
    /// Creates a request from raw identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for a malformed identifier.
    pub fn new(task_id: &str, column_id: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            task_id: TaskId::from_uuid(parse_id("task_id", task_id)?),
            column_id: ColumnId::from_uuid(parse_id("column_id", column_id)?),
        })
    }
}

/// Request payload for a full task replace.
///
/// The task number is deliberately absent: it is assigned once at creation
/// and never replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutTaskRequest {
    task_id: TaskId,
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    tags: Vec<String>,
    checklists: Vec<Checklist>,
}

impl PutTaskRequest {
    /// Creates a request with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for a malformed identifier
    /// and [`ValidationError::TitleLength`] for an out-of-range title.
    pub fn new(
        task_id: &str,
        board_id: &str,
        column_id: &str,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title_value = title.into();
        validate_title(&title_value)?;
        Ok(Self {
            task_id: TaskId::from_uuid(parse_id("task_id", task_id)?),
            board_id: BoardId::from_uuid(parse_id("board_id", board_id)?),
            column_id: ColumnId::from_uuid(parse_id("column_id", column_id)?),
            title: title_value,
            description: None,
            tags: Vec::new(),
            checklists: Vec::new(),
        })
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the replacement checklists.
    #[must_use]
    pub fn with_checklists(mut self, checklists: impl IntoIterator<Item = Checklist>) -> Self {
        self.checklists = checklists.into_iter().collect();
        self
    }

    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            column_id: self.column_id,
            board_id: self.board_id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            checklists: self.checklists,
        }
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task under an existing column at the next board number.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::ColumnNotInBoard`] when the column does not
    /// belong to the board or either is deleted.
    pub async fn create_task(&self, request: CreateTaskRequest) -> OpsResult<Task> {
        let board_id = request.board_id;
        let column_id = request.column_id;
        if !self.repository.column_in_board(board_id, column_id).await? {
            return Err(OpsError::ColumnNotInBoard {
                board_id,
                column_id,
            });
        }

        let number = ordering::next_task_number(&*self.repository, board_id).await?;
        let task = Task::new(number, request.into_draft(), &*self.clock);

        self.repository.insert_task(&task).await?;
        Ok(task)
    }

    /// Retrieves an active task.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::TaskNotFound`] when no active task matches.
    pub async fn get_task(&self, task_id: &str) -> OpsResult<Task> {
        let id = TaskId::from_uuid(parse_id("task_id", task_id)?);
        self.repository
            .find_task(id)
            .await?
            .ok_or(OpsError::TaskNotFound(id))
    }

    /// Relocates a task to another column of its board.
    ///
    /// The task keeps its number; only `column_id` and `updated_at`
    /// change.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::TaskNotFound`] when no active task matches,
    /// [`OpsError::Domain`] with
    /// [`DomainError::AlreadyInColumn`](crate::board::domain::DomainError::AlreadyInColumn)
    /// when the target equals the current column, and
    /// [`OpsError::ColumnNotInBoard`] when the target column does not
    /// belong to the task's board.
    pub async fn move_task(&self, request: MoveTaskRequest) -> OpsResult<Task> {
        let mut task = self
            .repository
            .find_task(request.task_id)
            .await?
            .ok_or(OpsError::TaskNotFound(request.task_id))?;

        let board_id = task.board_id();
        task.move_to_column(request.column_id, &*self.clock)?;

        if !self
            .repository
            .column_in_board(board_id, request.column_id)
            .await?
        {
            return Err(OpsError::ColumnNotInBoard {
                board_id,
                column_id: request.column_id,
            });
        }

        self.repository.update_task(&task).await?;
        Ok(task)
    }

    /// Replaces all mutable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::TaskNotFound`] when no active task matches and
    /// [`OpsError::ColumnNotInBoard`] when the target column does not
    /// belong to the target board.
    pub async fn put_task(&self, request: PutTaskRequest) -> OpsResult<Task> {
        let mut task = self
            .repository
            .find_task(request.task_id)
            .await?
            .ok_or(OpsError::TaskNotFound(request.task_id))?;

        let board_id = request.board_id;
        let column_id = request.column_id;
        if !self.repository.column_in_board(board_id, column_id).await? {
            return Err(OpsError::ColumnNotInBoard {
                board_id,
                column_id,
            });
        }

        task.update(request.into_draft(), &*self.clock);
        self.repository.update_task(&task).await?;
        Ok(task)
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::TaskNotFound`] when no active task matches;
    /// deleting an already-deleted task falls under the same error.
    pub async fn delete_task(&self, task_id: &str) -> OpsResult<()> {
        let id = TaskId::from_uuid(parse_id("task_id", task_id)?);
        let mut task = self
            .repository
            .find_task(id)
            .await?
            .ok_or(OpsError::TaskNotFound(id))?;

        task.delete(&*self.clock);
        self.repository.update_task(&task).await?;
        Ok(())
    }

    /// Returns the page of active tasks matching the composed filter.
    ///
    /// An empty page is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Repository`] when the search fails.
    pub async fn search_tasks(&self, search: &TaskSearch) -> OpsResult<Vec<Task>> {
        Ok(self.repository.search_tasks(search).await?)
    }
}
