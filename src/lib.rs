//! Teamboard: collaborative task board engine.
//!
//! This crate implements the board-aggregate consistency rules for
//! collaborative task boards: boards own ordered columns, columns hold
//! ordered tasks, and tasks carry checklists. The engine keeps that state
//! coherent across independent write operations — dense per-board ordering
//! counters, cascading soft deletion, the empty-column deletion guard, and
//! task relocation.
//!
//! # Architecture
//!
//! Teamboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`board`]: Board, column, and task lifecycle management

pub mod board;
