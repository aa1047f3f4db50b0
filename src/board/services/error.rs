//! Service-level error taxonomy for board operations.

use crate::board::domain::{BoardId, ColumnId, DomainError, TaskId};
use crate::board::ports::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// Result type for board service operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Malformed input caught before any storage access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An identifier is not a well-formed UUID.
    #[error("invalid {field} identifier: '{value}'")]
    InvalidId {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// The task title is empty or longer than 255 characters.
    #[error("task title must be between 1 and 255 characters, got {0}")]
    TitleLength(usize),
}

/// Closed error taxonomy exposed by the board services.
///
/// Callers can exhaustively match outcomes; no error kind requires string
/// comparison or downcasting. Storage failures keep their cause attached
/// for diagnostics but are never interpreted or retried here.
#[derive(Debug, Clone, Error)]
pub enum OpsError {
    /// Malformed input, recoverable by correcting the request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Domain validation or state-transition failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An active board already uses the requested short name.
    #[error("board with short name '{0}' already exists")]
    BoardAlreadyExists(String),

    /// The referenced board does not exist or is deleted.
    #[error("board {0} not found")]
    BoardNotFound(BoardId),

    /// The referenced column does not exist or is deleted.
    #[error("column {0} not found")]
    ColumnNotFound(ColumnId),

    /// The referenced task does not exist or is deleted.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The column still owns active tasks and cannot be deleted.
    #[error("column {0} is not empty")]
    ColumnNotEmpty(ColumnId),

    /// The column does not belong to the board, or either is deleted.
    #[error("column {column_id} does not belong to board {board_id}")]
    ColumnNotInBoard {
        /// Board the column was checked against.
        board_id: BoardId,
        /// Column that failed the membership check.
        column_id: ColumnId,
    },

    /// The operation was cancelled before completing.
    #[error("operation canceled")]
    Canceled,

    /// Unclassified storage failure, cause preserved.
    #[error("repository failure: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for OpsError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Canceled => Self::Canceled,
            other => Self::Repository(other),
        }
    }
}

/// Parses a raw identifier, naming the field in the failure.
pub(crate) fn parse_id(field: &'static str, value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| ValidationError::InvalidId {
        field,
        value: value.to_owned(),
    })
}
