//! Board, column, and task lifecycle management.
//!
//! This module implements the board aggregate: creating boards together
//! with their default column, appending columns and tasks with dense
//! per-board sequence numbers, relocating tasks between columns, guarded
//! column deletion, cascading board deletion, and tag/title search. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
