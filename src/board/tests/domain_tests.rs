//! Domain-focused tests for board, column, and task invariants.

use crate::board::domain::{
    Board, BoardId, Checklist, ChecklistItem, Column, ColumnId, DomainError, Task, TaskDraft,
    DEFAULT_COLUMN_NAME,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::thread::sleep;
use std::time::Duration;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn draft(board_id: BoardId, column_id: ColumnId) -> TaskDraft {
    TaskDraft {
        column_id,
        board_id,
        title: "Implement API".to_owned(),
        description: Some("Use async Rust".to_owned()),
        tags: vec!["backend".to_owned(), "api".to_owned()],
        checklists: vec![Checklist::new(
            "Rollout",
            vec![
                ChecklistItem::new("write code", false),
                ChecklistItem::new("ship it", false),
            ],
        )],
    }
}

#[rstest]
fn provision_creates_board_with_default_column(clock: DefaultClock) {
    let provisioned = Board::provision("My Project", "MP-1", &clock).expect("valid board");

    assert_eq!(provisioned.board.name(), "My Project");
    assert_eq!(provisioned.board.short_name(), "MP-1");
    assert!(provisioned.board.is_active());
    assert_eq!(provisioned.board.created_at(), provisioned.board.updated_at());

    let column = &provisioned.default_column;
    assert_eq!(column.board_id(), provisioned.board.id());
    assert_eq!(column.name(), DEFAULT_COLUMN_NAME);
    assert_eq!(column.order_num(), 0);
    assert!(column.is_active());
}

#[rstest]
fn provision_rejects_empty_name(clock: DefaultClock) {
    let result = Board::provision("", "MP-1", &clock);
    assert_eq!(result.unwrap_err(), DomainError::InvalidName);
}

#[rstest]
fn provision_rejects_overlong_name(clock: DefaultClock) {
    let name = "x".repeat(101);
    let result = Board::provision(&name, "MP-1", &clock);
    assert_eq!(result.unwrap_err(), DomainError::InvalidName);
}

#[rstest]
#[case("a")]
#[case("elevenchars")]
#[case("bad name")]
#[case("nope!")]
fn provision_rejects_bad_short_name(clock: DefaultClock, #[case] short_name: &str) {
    let result = Board::provision("My Project", short_name, &clock);
    assert_eq!(result.unwrap_err(), DomainError::InvalidShortName);
}

#[rstest]
#[case("MP-1")]
#[case("ab")]
#[case("team_board")]
fn provision_accepts_valid_short_name(clock: DefaultClock, #[case] short_name: &str) {
    let result = Board::provision("My Project", short_name, &clock);
    assert!(result.is_ok());
}

#[rstest]
#[case("")]
#[case("   ")]
fn column_rejects_blank_name(clock: DefaultClock, #[case] name: &str) {
    let result = Column::new(BoardId::new(), name, 0, &clock);
    assert_eq!(result.unwrap_err(), DomainError::EmptyColumnName);
}

#[rstest]
fn task_creation_keeps_draft_content(clock: DefaultClock) {
    let board_id = BoardId::new();
    let column_id = ColumnId::new();
    let task = Task::new(7, draft(board_id, column_id), &clock);

    assert_eq!(task.board_id(), board_id);
    assert_eq!(task.column_id(), column_id);
    assert_eq!(task.number(), 7);
    assert_eq!(task.title(), "Implement API");
    assert_eq!(task.description(), Some("Use async Rust"));
    assert_eq!(task.tags(), ["backend".to_owned(), "api".to_owned()]);
    assert_eq!(task.checklists().len(), 1);
    assert!(task.is_active());
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn task_update_round_trip_only_bumps_timestamp(clock: DefaultClock) {
    let board_id = BoardId::new();
    let column_id = ColumnId::new();
    let mut task = Task::new(0, draft(board_id, column_id), &clock);
    let created_at = task.created_at();
    let first_updated_at = task.updated_at();

    sleep(Duration::from_millis(2));
    task.update(draft(board_id, column_id), &clock);

    assert_eq!(task.title(), "Implement API");
    assert_eq!(task.description(), Some("Use async Rust"));
    assert_eq!(task.tags(), ["backend".to_owned(), "api".to_owned()]);
    assert_eq!(task.checklists().len(), 1);
    assert_eq!(task.number(), 0);
    assert_eq!(task.created_at(), created_at);
    assert!(task.updated_at() > first_updated_at);
}

#[rstest]
fn task_move_to_column_changes_column_only(clock: DefaultClock) {
    let mut task = Task::new(3, draft(BoardId::new(), ColumnId::new()), &clock);
    let first_updated_at = task.updated_at();
    let target = ColumnId::new();

    sleep(Duration::from_millis(2));
    task.move_to_column(target, &clock).expect("move succeeds");

    assert_eq!(task.column_id(), target);
    assert_eq!(task.number(), 3);
    assert!(task.updated_at() > first_updated_at);
}

#[rstest]
fn task_move_to_current_column_is_rejected(clock: DefaultClock) {
    let column_id = ColumnId::new();
    let mut task = Task::new(0, draft(BoardId::new(), column_id), &clock);
    let updated_at = task.updated_at();

    let result = task.move_to_column(column_id, &clock);

    assert_eq!(result.unwrap_err(), DomainError::AlreadyInColumn(column_id));
    assert_eq!(task.column_id(), column_id);
    assert_eq!(task.updated_at(), updated_at, "rejected move must not touch the task");
}

#[rstest]
fn delete_sets_tombstone_and_overwrites_on_repeat(clock: DefaultClock) {
    let mut task = Task::new(0, draft(BoardId::new(), ColumnId::new()), &clock);
    assert!(task.deleted_at().is_none());

    task.delete(&clock);
    let first_tombstone = task.deleted_at().expect("tombstone set");

    sleep(Duration::from_millis(2));
    task.delete(&clock);
    let second_tombstone = task.deleted_at().expect("tombstone still set");

    assert!(second_tombstone > first_tombstone);
    assert!(!task.is_active());
}

#[rstest]
fn checklist_items_preserve_order() {
    let checklist = Checklist::new(
        "Release",
        vec![
            ChecklistItem::new("tag", false),
            ChecklistItem::new("publish", true),
        ],
    );

    assert_eq!(checklist.title, "Release");
    let titles: Vec<&str> = checklist.items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["tag", "publish"]);
    assert!(checklist.items.iter().any(|item| item.completed));
}
