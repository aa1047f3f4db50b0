//! Board aggregate root and provisioning rules.

use super::{BoardId, Column, DomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Name given to the column every new board starts with.
pub const DEFAULT_COLUMN_NAME: &str = "TODO";

const MAX_NAME_CHARS: usize = 100;
const SHORT_NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=10;

/// Top-level container of columns and tasks, identified by a short name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: String,
    short_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// A freshly provisioned board together with its default column.
///
/// The two are created in one step and must be persisted in one step: a
/// board without its first column violates the aggregate invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedBoard {
    /// The new board.
    pub board: Board,
    /// The board's first column, order 0, named [`DEFAULT_COLUMN_NAME`].
    pub default_column: Column,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted board name.
    pub name: String,
    /// Persisted short name.
    pub short_name: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted deletion tombstone, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Creates a new board together with its default column.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidName`] when the name is empty or
    /// longer than 100 characters, and [`DomainError::InvalidShortName`]
    /// when the short name is not 2-10 characters drawn from
    /// `[A-Za-z0-9_-]`.
    pub fn provision(
        name: &str,
        short_name: &str,
        clock: &impl Clock,
    ) -> Result<ProvisionedBoard, DomainError> {
        validate_name(name)?;
        validate_short_name(short_name)?;

        let timestamp = clock.utc();
        let board = Self {
            id: BoardId::new(),
            name: name.to_owned(),
            short_name: short_name.to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        };
        let default_column = Column::new(board.id, DEFAULT_COLUMN_NAME, 0, clock)?;

        Ok(ProvisionedBoard {
            board,
            default_column,
        })
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            short_name: data.short_name,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the board short name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
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

    /// Returns the deletion tombstone, if the board is deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the board carries no deletion tombstone.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Marks the board deleted at the current clock time.
    ///
    /// Idempotent at the entity level: a second call overwrites the
    /// tombstone timestamp.
    pub fn delete(&mut self, clock: &impl Clock) {
        self.deleted_at = Some(clock.utc());
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let chars = name.chars().count();
    if chars == 0 || chars > MAX_NAME_CHARS {
        return Err(DomainError::InvalidName);
    }
    Ok(())
}

fn validate_short_name(short_name: &str) -> Result<(), DomainError> {
    let valid_chars = short_name
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !SHORT_NAME_CHARS.contains(&short_name.chars().count()) || !valid_chars {
        return Err(DomainError::InvalidShortName);
    }
    Ok(())
}
