//! Service orchestration tests for board and column lifecycle.

use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{DomainError, ProvisionedBoard, DEFAULT_COLUMN_NAME},
    services::{
        BoardService, ColumnService, CreateColumnRequest, CreateTaskRequest, OpsError, TaskService,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Services {
    boards: BoardService<InMemoryBoardRepository, DefaultClock>,
    columns: ColumnService<InMemoryBoardRepository, DefaultClock>,
    tasks: TaskService<InMemoryBoardRepository, DefaultClock>,
}

#[fixture]
fn services() -> Services {
    let repository = Arc::new(InMemoryBoardRepository::new());
    let clock = Arc::new(DefaultClock);
    Services {
        boards: BoardService::new(Arc::clone(&repository), Arc::clone(&clock)),
        columns: ColumnService::new(Arc::clone(&repository), Arc::clone(&clock)),
        tasks: TaskService::new(repository, clock),
    }
}

async fn provision_board(services: &Services) -> ProvisionedBoard {
    services
        .boards
        .create_board("My Project", "MP-1")
        .await
        .expect("board creation should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_persists_board_and_default_column(services: Services) {
    let provisioned = provision_board(&services).await;

    let details = services
        .boards
        .get_board(&provisioned.board.id().to_string())
        .await
        .expect("board should be retrievable");

    assert_eq!(details.board, provisioned.board);
    assert_eq!(details.columns.len(), 1);
    let column = details.columns.first().expect("default column present");
    assert_eq!(column.name(), DEFAULT_COLUMN_NAME);
    assert_eq!(column.order_num(), 0);
    assert!(details.tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_rejects_taken_short_name(services: Services) {
    provision_board(&services).await;

    let result = services.boards.create_board("Another Project", "MP-1").await;

    assert!(matches!(
        result,
        Err(OpsError::BoardAlreadyExists(short_name)) if short_name == "MP-1"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_board_rejects_invalid_short_name_before_storage(services: Services) {
    let result = services.boards.create_board("My Project", "bad name").await;

    assert!(matches!(
        result,
        Err(OpsError::Domain(DomainError::InvalidShortName))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_column_requires_active_board(services: Services) {
    let request = CreateColumnRequest::new(&uuid::Uuid::new_v4().to_string(), "In Progress")
        .expect("valid request");

    let result = services.columns.create_column(request).await;

    assert!(matches!(result, Err(OpsError::BoardNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_column_is_guarded_by_active_tasks(services: Services) {
    let provisioned = provision_board(&services).await;
    let board_id = provisioned.board.id().to_string();
    let column_id = provisioned.default_column.id().to_string();

    let task = services
        .tasks
        .create_task(
            CreateTaskRequest::new(&board_id, &column_id, "Implement API")
                .expect("valid request"),
        )
        .await
        .expect("task creation should succeed");

    let blocked = services.columns.delete_column(&column_id).await;
    assert!(matches!(blocked, Err(OpsError::ColumnNotEmpty(_))));

    // A failed attempt must leave the column active.
    let still_there = services
        .columns
        .get_column(&column_id)
        .await
        .expect("column should remain active");
    assert!(still_there.is_active());

    services
        .tasks
        .delete_task(&task.id().to_string())
        .await
        .expect("task deletion should succeed");

    services
        .columns
        .delete_column(&column_id)
        .await
        .expect("empty column deletion should succeed");

    let gone = services.columns.get_column(&column_id).await;
    assert!(matches!(gone, Err(OpsError::ColumnNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_board_cascades_to_columns_and_tasks(services: Services) {
    let provisioned = provision_board(&services).await;
    let board_id = provisioned.board.id().to_string();
    let column_id = provisioned.default_column.id().to_string();

    let second_column = services
        .columns
        .create_column(CreateColumnRequest::new(&board_id, "In Progress").expect("valid request"))
        .await
        .expect("column creation should succeed");
    let task = services
        .tasks
        .create_task(
            CreateTaskRequest::new(&board_id, &column_id, "Implement API")
                .expect("valid request"),
        )
        .await
        .expect("task creation should succeed");

    services
        .boards
        .delete_board(&board_id)
        .await
        .expect("board deletion should succeed");

    let board_gone = services.boards.get_board(&board_id).await;
    assert!(matches!(board_gone, Err(OpsError::BoardNotFound(_))));

    let first_column_gone = services.columns.get_column(&column_id).await;
    assert!(matches!(first_column_gone, Err(OpsError::ColumnNotFound(_))));

    let second_column_gone = services
        .columns
        .get_column(&second_column.id().to_string())
        .await;
    assert!(matches!(second_column_gone, Err(OpsError::ColumnNotFound(_))));

    let task_gone = services.tasks.get_task(&task.id().to_string()).await;
    assert!(matches!(task_gone, Err(OpsError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_board_twice_reports_not_found(services: Services) {
    let provisioned = provision_board(&services).await;
    let board_id = provisioned.board.id().to_string();

    services
        .boards
        .delete_board(&board_id)
        .await
        .expect("first deletion should succeed");

    let second = services.boards.delete_board(&board_id).await;
    assert!(matches!(second, Err(OpsError::BoardNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_boards_orders_by_most_recent_update(services: Services) {
    provision_board(&services).await;
    sleep(Duration::from_millis(2));
    services
        .boards
        .create_board("Second Project", "SP-1")
        .await
        .expect("board creation should succeed");

    let boards = services
        .boards
        .get_boards()
        .await
        .expect("listing should succeed");

    let short_names: Vec<&str> = boards.iter().map(|board| board.short_name()).collect();
    assert_eq!(short_names, ["SP-1", "MP-1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_board_rejects_malformed_identifier(services: Services) {
    let result = services.boards.get_board("not-a-uuid").await;
    assert!(matches!(result, Err(OpsError::Validation(_))));
}
