//! Application services for board lifecycle orchestration.

mod boards;
mod columns;
mod error;
pub mod ordering;
mod tasks;

pub use boards::{BoardDetails, BoardService};
pub use columns::{ColumnService, CreateColumnRequest};
pub use error::{OpsError, OpsResult, ValidationError};
pub use tasks::{CreateTaskRequest, MoveTaskRequest, PutTaskRequest, TaskService};
