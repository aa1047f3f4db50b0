//! Port contracts for the board aggregate.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;

pub use repository::{
    BoardRepository, RepositoryError, RepositoryResult, TaskSearch, MAX_PAGE_SIZE,
};

#[cfg(test)]
pub use repository::MockBoardRepository;
