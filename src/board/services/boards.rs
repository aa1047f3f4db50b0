//! Board lifecycle service: provisioning, retrieval, cascading deletion.

use super::error::{parse_id, OpsError, OpsResult};
use crate::board::domain::{Board, BoardId, Column, ProvisionedBoard, Task};
use crate::board::ports::BoardRepository;
use mockable::Clock;
use std::sync::Arc;

/// A board together with its active columns and tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDetails {
    /// The board itself.
    pub board: Board,
    /// Active columns in display order.
    pub columns: Vec<Column>,
    /// Active tasks in numbering order.
    pub tasks: Vec<Task>,
}

/// Board lifecycle orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a board together with its default "TODO" column.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Domain`] when the name or short name is
    /// invalid and [`OpsError::BoardAlreadyExists`] when an active board
    /// already uses the short name.
    pub async fn create_board(
        &self,
        name: &str,
        short_name: &str,
    ) -> OpsResult<ProvisionedBoard> {
        let provisioned = Board::provision(name, short_name, &*self.clock)?;

        if self.repository.short_name_taken(short_name).await? {
            return Err(OpsError::BoardAlreadyExists(short_name.to_owned()));
        }

        self.repository
            .insert_board(&provisioned.board, &provisioned.default_column)
            .await?;
        Ok(provisioned)
    }

    /// Retrieves an active board with its active columns and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::BoardNotFound`] when no active board matches.
    pub async fn get_board(&self, board_id: &str) -> OpsResult<BoardDetails> {
        let id = BoardId::from_uuid(parse_id("board_id", board_id)?);
        let board = self
            .repository
            .find_board(id)
            .await?
            .ok_or(OpsError::BoardNotFound(id))?;

        let columns = self.repository.list_columns(id).await?;
        let tasks = self.repository.list_tasks(id).await?;

        Ok(BoardDetails {
            board,
            columns,
            tasks,
        })
    }

    /// Returns all active boards, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Repository`] when the listing fails.
    pub async fn get_boards(&self) -> OpsResult<Vec<Board>> {
        Ok(self.repository.list_boards().await?)
    }

    /// Soft-deletes a board and cascades to its active columns and tasks.
    ///
    /// The board row and every dependent row transition together in one
    /// unit of work; a partial cascade would leave active tasks orphaned
    /// under a deleted board.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::BoardNotFound`] when no active board matches.
    pub async fn delete_board(&self, board_id: &str) -> OpsResult<()> {
        let id = BoardId::from_uuid(parse_id("board_id", board_id)?);
        let mut board = self
            .repository
            .find_board(id)
            .await?
            .ok_or(OpsError::BoardNotFound(id))?;

        board.delete(&*self.clock);
        tracing::debug!(%id, "cascading board soft-delete");
        self.repository.delete_board_cascade(&board).await?;
        Ok(())
    }
}
