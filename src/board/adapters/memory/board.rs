//! In-memory repository for board lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{
        Board, BoardId, Column, ColumnId, PersistedColumnData, PersistedTaskData, Task, TaskId,
    },
    ports::{BoardRepository, RepositoryError, RepositoryResult, TaskSearch},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Rebuilds a column with the given tombstone applied.
fn tombstone_column(column: &Column, deleted_at: DateTime<Utc>) -> Column {
    Column::from_persisted(PersistedColumnData {
        id: column.id(),
        board_id: column.board_id(),
        name: column.name().to_owned(),
        order_num: column.order_num(),
        created_at: column.created_at(),
        updated_at: column.updated_at(),
        deleted_at: Some(deleted_at),
    })
}

/// Rebuilds a task with the given tombstone applied.
fn tombstone_task(task: &Task, deleted_at: DateTime<Utc>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        board_id: task.board_id(),
        column_id: task.column_id(),
        number: task.number(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        tags: task.tags().to_vec(),
        checklists: task.checklists().to_vec(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: Some(deleted_at),
    })
}

fn matches_search(task: &Task, search: &TaskSearch) -> bool {
    let tags_match = search
        .tags()
        .iter()
        .all(|tag| task.tags().contains(tag));
    let title_match = search.title().is_empty()
        || task
            .title()
            .to_lowercase()
            .contains(&search.title().to_lowercase());
    tags_match && title_match
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn insert_board(&self, board: &Board, default_column: &Column) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.boards.insert(board.id(), board.clone());
        state
            .columns
            .insert(default_column.id(), default_column.clone());
        Ok(())
    }

    async fn insert_column(&self, column: &Column) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn insert_task(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_column(&self, column: &Column) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let stored_active = state
            .columns
            .get(&column.id())
            .is_some_and(Column::is_active);
        if !stored_active {
            return Err(RepositoryError::NotFound(column.id().into_inner()));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let stored_active = state.tasks.get(&task.id()).is_some_and(Task::is_active);
        if !stored_active {
            return Err(RepositoryError::NotFound(task.id().into_inner()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_board_cascade(&self, board: &Board) -> RepositoryResult<()> {
        let deleted_at = board.deleted_at().ok_or_else(|| {
            RepositoryError::persistence(std::io::Error::other(
                "cascade requires a tombstoned board",
            ))
        })?;

        let mut state = self.write()?;
        if !state.boards.contains_key(&board.id()) {
            return Err(RepositoryError::NotFound(board.id().into_inner()));
        }
        state.boards.insert(board.id(), board.clone());

        let cascaded_columns: Vec<Column> = state
            .columns
            .values()
            .filter(|column| column.board_id() == board.id() && column.is_active())
            .map(|column| tombstone_column(column, deleted_at))
            .collect();
        for column in cascaded_columns {
            state.columns.insert(column.id(), column);
        }

        let cascaded_tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.board_id() == board.id() && task.is_active())
            .map(|task| tombstone_task(task, deleted_at))
            .collect();
        for task in cascaded_tasks {
            state.tasks.insert(task.id(), task);
        }

        Ok(())
    }

    async fn find_board(&self, id: BoardId) -> RepositoryResult<Option<Board>> {
        let state = self.read()?;
        Ok(state.boards.get(&id).filter(|board| board.is_active()).cloned())
    }

    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<Column>> {
        let state = self.read()?;
        Ok(state
            .columns
            .get(&id)
            .filter(|column| column.is_active())
            .cloned())
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).filter(|task| task.is_active()).cloned())
    }

    async fn list_boards(&self) -> RepositoryResult<Vec<Board>> {
        let state = self.read()?;
        let mut boards: Vec<Board> = state
            .boards
            .values()
            .filter(|board| board.is_active())
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(boards)
    }

    async fn list_columns(&self, board_id: BoardId) -> RepositoryResult<Vec<Column>> {
        let state = self.read()?;
        let mut columns: Vec<Column> = state
            .columns
            .values()
            .filter(|column| column.board_id() == board_id && column.is_active())
            .cloned()
            .collect();
        columns.sort_by_key(Column::order_num);
        Ok(columns)
    }

    async fn list_tasks(&self, board_id: BoardId) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.board_id() == board_id && task.is_active())
            .cloned()
            .collect();
        tasks.sort_by_key(Task::number);
        Ok(tasks)
    }

    async fn board_active(&self, id: BoardId) -> RepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.boards.get(&id).is_some_and(Board::is_active))
    }

    async fn short_name_taken(&self, short_name: &str) -> RepositoryResult<bool> {
        let state = self.read()?;
        Ok(state
            .boards
            .values()
            .any(|board| board.is_active() && board.short_name() == short_name))
    }

    async fn column_in_board(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
    ) -> RepositoryResult<bool> {
        let state = self.read()?;
        let board_is_active = state.boards.get(&board_id).is_some_and(Board::is_active);
        let column_belongs = state
            .columns
            .get(&column_id)
            .is_some_and(|column| column.is_active() && column.board_id() == board_id);
        Ok(board_is_active && column_belongs)
    }

    async fn column_has_active_tasks(&self, column_id: ColumnId) -> RepositoryResult<bool> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .any(|task| task.column_id() == column_id && task.is_active()))
    }

    async fn max_column_order(&self, board_id: BoardId) -> RepositoryResult<Option<i64>> {
        let state = self.read()?;
        Ok(state
            .columns
            .values()
            .filter(|column| column.board_id() == board_id && column.is_active())
            .map(Column::order_num)
            .max())
    }

    async fn max_task_number(&self, board_id: BoardId) -> RepositoryResult<Option<i64>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.board_id() == board_id && task.is_active())
            .map(Task::number)
            .max())
    }

    async fn search_tasks(&self, search: &TaskSearch) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut matches: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| {
                task.is_active()
                    && state
                        .boards
                        .get(&task.board_id())
                        .is_some_and(Board::is_active)
                    && matches_search(task, search)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let offset = usize::try_from(search.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(search.limit()).unwrap_or(usize::MAX);
        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }
}
