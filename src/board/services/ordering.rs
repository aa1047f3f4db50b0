//! Dense per-board sequence allocation for columns and tasks.
//!
//! Both counters follow the same pattern: read the current maximum among
//! active rows and add one, or start at 0 when the board has none. An
//! absent maximum is not an error. The read-then-use pattern is not
//! protected against concurrent creates on the same board; see DESIGN.md.

use crate::board::domain::BoardId;
use crate::board::ports::{BoardRepository, RepositoryResult};

/// Computes the next column `order_num` for the board.
///
/// # Errors
///
/// Propagates any repository failure other than the no-rows case.
pub async fn next_column_order<R>(repository: &R, board_id: BoardId) -> RepositoryResult<i64>
where
    R: BoardRepository + ?Sized,
{
    let current = repository.max_column_order(board_id).await.inspect_err(
        |err| tracing::warn!(%board_id, error = %err, "failed to read max column order"),
    )?;
    Ok(current.map_or(0, |max| max + 1))
}

/// Computes the next task number for the board.
///
/// # Errors
///
/// Propagates any repository failure other than the no-rows case.
pub async fn next_task_number<R>(repository: &R, board_id: BoardId) -> RepositoryResult<i64>
where
    R: BoardRepository + ?Sized,
{
    let current = repository.max_task_number(board_id).await.inspect_err(
        |err| tracing::warn!(%board_id, error = %err, "failed to read max task number"),
    )?;
    Ok(current.map_or(0, |max| max + 1))
}
