//! Behavioural integration test for the board aggregate services.
//!
//! Walks a full board lifecycle through the public API with the in-memory
//! repository: provisioning, column ordering, task numbering, relocation,
//! the empty-column guard, and the cascading board delete.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use teamboard::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::DEFAULT_COLUMN_NAME,
    ports::TaskSearch,
    services::{
        BoardService, ColumnService, CreateColumnRequest, CreateTaskRequest, MoveTaskRequest,
        OpsError, TaskService,
    },
};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

#[test]
fn full_board_lifecycle_through_services() {
    let rt = test_runtime();
    let repository = Arc::new(InMemoryBoardRepository::new());
    let clock = Arc::new(DefaultClock);
    let boards = BoardService::new(Arc::clone(&repository), Arc::clone(&clock));
    let columns = ColumnService::new(Arc::clone(&repository), Arc::clone(&clock));
    let tasks = TaskService::new(repository, clock);

    rt.block_on(async {
        // A fresh board starts with exactly one column, "TODO", at order 0.
        let provisioned = boards
            .create_board("My Project", "MP-1")
            .await
            .expect("board creation should succeed");
        let board_id = provisioned.board.id().to_string();
        let todo_id = provisioned.default_column.id().to_string();
        assert_eq!(provisioned.default_column.name(), DEFAULT_COLUMN_NAME);
        assert_eq!(provisioned.default_column.order_num(), 0);

        // The next column continues the dense sequence.
        let in_progress = columns
            .create_column(
                CreateColumnRequest::new(&board_id, "In Progress").expect("valid request"),
            )
            .await
            .expect("column creation should succeed");
        assert_eq!(in_progress.order_num(), 1);

        // The first task on the board gets number 0.
        let task = tasks
            .create_task(
                CreateTaskRequest::new(&board_id, &todo_id, "Implement API")
                    .expect("valid request")
                    .with_tags(vec!["backend".to_owned()]),
            )
            .await
            .expect("task creation should succeed");
        assert_eq!(task.number(), 0);

        // "TODO" still holds the task, so deleting it is blocked.
        let blocked = columns.delete_column(&todo_id).await;
        assert!(matches!(blocked, Err(OpsError::ColumnNotEmpty(_))));

        // Relocation changes the column but never the number.
        let moved = tasks
            .move_task(
                MoveTaskRequest::new(&task.id().to_string(), &in_progress.id().to_string())
                    .expect("valid request"),
            )
            .await
            .expect("move should succeed");
        assert_eq!(moved.column_id(), in_progress.id());
        assert_eq!(moved.number(), 0);

        // Once empty, "TODO" can go.
        columns
            .delete_column(&todo_id)
            .await
            .expect("empty column deletion should succeed");

        // The task is still findable by tag until the board goes away.
        let found = tasks
            .search_tasks(&TaskSearch::new(vec!["backend".to_owned()], "api", 0, 0))
            .await
            .expect("search should succeed");
        assert_eq!(found.len(), 1);

        boards
            .delete_board(&board_id)
            .await
            .expect("board deletion should succeed");

        let after_cascade = tasks
            .search_tasks(&TaskSearch::new(Vec::new(), "", 0, 0))
            .await
            .expect("search should succeed");
        assert!(after_cascade.is_empty());

        let board_gone = boards.get_board(&board_id).await;
        assert!(matches!(board_gone, Err(OpsError::BoardNotFound(_))));
    });
}
