//! Column lifecycle service: ordered creation and guarded deletion.

use super::error::{parse_id, OpsError, OpsResult, ValidationError};
use super::ordering;
use crate::board::domain::{BoardId, Column, ColumnId};
use crate::board::ports::BoardRepository;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    board_id: BoardId,
    name: String,
}

impl CreateColumnRequest {
    /// Creates a request from raw identifier and name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] when the board identifier is
    /// not a well-formed UUID.
    pub fn new(board_id: &str, name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            board_id: BoardId::from_uuid(parse_id("board_id", board_id)?),
            name: name.into(),
        })
    }

    /// Returns the target board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the requested column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Column lifecycle orchestration service.
#[derive(Clone)]
pub struct ColumnService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ColumnService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new column service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends a column to an active board at the next order position.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::BoardNotFound`] when the board does not exist
    /// or is deleted, and [`OpsError::Domain`] when the name is blank.
    pub async fn create_column(&self, request: CreateColumnRequest) -> OpsResult<Column> {
        if !self.repository.board_active(request.board_id).await? {
            return Err(OpsError::BoardNotFound(request.board_id));
        }

        let order_num = ordering::next_column_order(&*self.repository, request.board_id).await?;
        let column = Column::new(request.board_id, &request.name, order_num, &*self.clock)?;

        self.repository.insert_column(&column).await?;
        Ok(column)
    }

    /// Retrieves an active column.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::ColumnNotFound`] when no active column matches.
    pub async fn get_column(&self, column_id: &str) -> OpsResult<Column> {
        let id = ColumnId::from_uuid(parse_id("column_id", column_id)?);
        self.repository
            .find_column(id)
            .await?
            .ok_or(OpsError::ColumnNotFound(id))
    }

    /// Soft-deletes a column that owns no active tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::ColumnNotFound`] when no active column matches
    /// and [`OpsError::ColumnNotEmpty`] when active tasks remain; on that
    /// failure the column stays active.
    pub async fn delete_column(&self, column_id: &str) -> OpsResult<()> {
        let id = ColumnId::from_uuid(parse_id("column_id", column_id)?);
        let mut column = self
            .repository
            .find_column(id)
            .await?
            .ok_or(OpsError::ColumnNotFound(id))?;

        if self.repository.column_has_active_tasks(id).await? {
            return Err(OpsError::ColumnNotEmpty(id));
        }

        column.delete(&*self.clock);
        self.repository.update_column(&column).await?;
        Ok(())
    }
}
