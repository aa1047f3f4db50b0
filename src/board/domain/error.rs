//! Error types for board domain validation and state transitions.

use super::ColumnId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The board name is empty or longer than 100 characters.
    #[error("board name must be between 1 and 100 characters")]
    InvalidName,

    /// The short name does not match `[A-Za-z0-9_-]{2,10}`.
    #[error(
        "short name must be 2-10 characters and contain only letters, \
         numbers, hyphens or underscores"
    )]
    InvalidShortName,

    /// The column name is blank.
    #[error("column name can't be empty")]
    EmptyColumnName,

    /// The task already sits in the target column.
    #[error("task is already in column {0}")]
    AlreadyInColumn(ColumnId),
}
