//! `PostgreSQL` repository implementation for board aggregate storage.

use super::{
    models::{BoardRow, ColumnRow, NewBoardRow, NewColumnRow, NewTaskRow, TaskRow},
    schema::{boards, columns, tasks},
};
use crate::board::{
    domain::{
        Board, BoardId, Checklist, Column, ColumnId, PersistedBoardData, PersistedColumnData,
        PersistedTaskData, Task, TaskId,
    },
    ports::{BoardRepository, RepositoryError, RepositoryResult, TaskSearch},
};
use async_trait::async_trait;
use diesel::dsl::{exists, max};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the board repository.
///
/// This is the adapter's configuration surface: the database URL and pool
/// size come from the embedding application.
///
/// # Errors
///
/// Returns the pool builder's error when the pool cannot be constructed.
pub fn connect_pool(database_url: &str, max_size: u32) -> Result<BoardPgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::new(database_url))
}

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(|err| {
            if err.is_cancelled() {
                RepositoryError::Canceled
            } else {
                RepositoryError::persistence(err)
            }
        })?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn insert_board(&self, board: &Board, default_column: &Column) -> RepositoryResult<()> {
        let board_row = to_new_board_row(board);
        let column_row = to_new_column_row(default_column);

        self.run_blocking(move |connection| {
            connection
                .transaction(|conn| {
                    diesel::insert_into(boards::table)
                        .values(&board_row)
                        .execute(conn)?;
                    diesel::insert_into(columns::table)
                        .values(&column_row)
                        .execute(conn)?;
                    Ok::<(), DieselError>(())
                })
                .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn insert_column(&self, column: &Column) -> RepositoryResult<()> {
        let row = to_new_column_row(column);
        self.run_blocking(move |connection| {
            diesel::insert_into(columns::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> RepositoryResult<()> {
        let row = to_new_task_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update_column(&self, column: &Column) -> RepositoryResult<()> {
        let id = column.id().into_inner();
        let name = column.name().to_owned();
        let order_num = column.order_num();
        let updated_at = column.updated_at();
        let deleted_at = column.deleted_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                columns::table
                    .filter(columns::id.eq(id))
                    .filter(columns::deleted_at.is_null()),
            )
            .set((
                columns::name.eq(name),
                columns::order_num.eq(order_num),
                columns::updated_at.eq(updated_at),
                columns::deleted_at.eq(deleted_at),
            ))
            .execute(connection)
            .map_err(RepositoryError::persistence)?;

            if updated == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id().into_inner();
        let board_id = task.board_id().into_inner();
        let column_id = task.column_id().into_inner();
        let title = task.title().to_owned();
        let description = task.description().map(str::to_owned);
        let tags = task.tags().to_vec();
        let checklists = checklists_to_value(task.checklists())?;
        let updated_at = task.updated_at();
        let deleted_at = task.deleted_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id))
                    .filter(tasks::deleted_at.is_null()),
            )
            .set((
                tasks::board_id.eq(board_id),
                tasks::column_id.eq(column_id),
                tasks::title.eq(title),
                tasks::description.eq(description),
                tasks::tags.eq(tags),
                tasks::checklists.eq(checklists),
                tasks::updated_at.eq(updated_at),
                tasks::deleted_at.eq(deleted_at),
            ))
            .execute(connection)
            .map_err(RepositoryError::persistence)?;

            if updated == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_board_cascade(&self, board: &Board) -> RepositoryResult<()> {
        let id = board.id().into_inner();
        let deleted_at = board.deleted_at().ok_or_else(|| {
            RepositoryError::persistence(std::io::Error::other(
                "cascade requires a tombstoned board",
            ))
        })?;

        self.run_blocking(move |connection| {
            connection
                .transaction(|conn| {
                    let updated = diesel::update(
                        boards::table
                            .filter(boards::id.eq(id))
                            .filter(boards::deleted_at.is_null()),
                    )
                    .set((
                        boards::deleted_at.eq(Some(deleted_at)),
                        boards::updated_at.eq(deleted_at),
                    ))
                    .execute(conn)?;
                    if updated == 0 {
                        return Err(DieselError::NotFound);
                    }

                    diesel::update(
                        columns::table
                            .filter(columns::board_id.eq(id))
                            .filter(columns::deleted_at.is_null()),
                    )
                    .set((
                        columns::deleted_at.eq(Some(deleted_at)),
                        columns::updated_at.eq(deleted_at),
                    ))
                    .execute(conn)?;

                    diesel::update(
                        tasks::table
                            .filter(tasks::board_id.eq(id))
                            .filter(tasks::deleted_at.is_null()),
                    )
                    .set((
                        tasks::deleted_at.eq(Some(deleted_at)),
                        tasks::updated_at.eq(deleted_at),
                    ))
                    .execute(conn)?;

                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => RepositoryError::NotFound(id),
                    other => RepositoryError::persistence(other),
                })
        })
        .await
    }

    async fn find_board(&self, id: BoardId) -> RepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .filter(boards::deleted_at.is_null())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            Ok(row.map(row_to_board))
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = columns::table
                .filter(columns::id.eq(id.into_inner()))
                .filter(columns::deleted_at.is_null())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_boards(&self) -> RepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .filter(boards::deleted_at.is_null())
                .order(boards::updated_at.desc())
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_board).collect())
        })
        .await
    }

    async fn list_columns(&self, board_id: BoardId) -> RepositoryResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = columns::table
                .filter(columns::board_id.eq(board_id.into_inner()))
                .filter(columns::deleted_at.is_null())
                .order(columns::order_num.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_column).collect())
        })
        .await
    }

    async fn list_tasks(&self, board_id: BoardId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::board_id.eq(board_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::number.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn board_active(&self, id: BoardId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(exists(
                boards::table
                    .filter(boards::id.eq(id.into_inner()))
                    .filter(boards::deleted_at.is_null()),
            ))
            .get_result::<bool>(connection)
            .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn short_name_taken(&self, short_name: &str) -> RepositoryResult<bool> {
        let lookup = short_name.to_owned();
        self.run_blocking(move |connection| {
            diesel::select(exists(
                boards::table
                    .filter(boards::short_name.eq(lookup))
                    .filter(boards::deleted_at.is_null()),
            ))
            .get_result::<bool>(connection)
            .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn column_in_board(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
    ) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(exists(
                columns::table
                    .inner_join(boards::table)
                    .filter(columns::id.eq(column_id.into_inner()))
                    .filter(columns::board_id.eq(board_id.into_inner()))
                    .filter(columns::deleted_at.is_null())
                    .filter(boards::deleted_at.is_null()),
            ))
            .get_result::<bool>(connection)
            .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn column_has_active_tasks(&self, column_id: ColumnId) -> RepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(exists(
                tasks::table
                    .filter(tasks::column_id.eq(column_id.into_inner()))
                    .filter(tasks::deleted_at.is_null()),
            ))
            .get_result::<bool>(connection)
            .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn max_column_order(&self, board_id: BoardId) -> RepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            columns::table
                .filter(columns::board_id.eq(board_id.into_inner()))
                .filter(columns::deleted_at.is_null())
                .select(max(columns::order_num))
                .first::<Option<i64>>(connection)
                .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn max_task_number(&self, board_id: BoardId) -> RepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::board_id.eq(board_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(max(tasks::number))
                .first::<Option<i64>>(connection)
                .map_err(RepositoryError::persistence)
        })
        .await
    }

    async fn search_tasks(&self, search: &TaskSearch) -> RepositoryResult<Vec<Task>> {
        let filter = search.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .inner_join(boards::table)
                .filter(tasks::deleted_at.is_null())
                .filter(boards::deleted_at.is_null())
                .select(TaskRow::as_select())
                .order(tasks::created_at.desc())
                .into_boxed();

            if !filter.tags().is_empty() {
                query = query.filter(tasks::tags.contains(filter.tags().to_vec()));
            }
            if !filter.title().is_empty() {
                query = query.filter(tasks::title.ilike(format!("%{}%", filter.title())));
            }

            let rows = query
                .limit(i64::from(filter.limit()))
                .offset(i64::from(filter.offset()))
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_board_row(board: &Board) -> NewBoardRow {
    NewBoardRow {
        id: board.id().into_inner(),
        name: board.name().to_owned(),
        short_name: board.short_name().to_owned(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
        deleted_at: board.deleted_at(),
    }
}

fn to_new_column_row(column: &Column) -> NewColumnRow {
    NewColumnRow {
        id: column.id().into_inner(),
        board_id: column.board_id().into_inner(),
        name: column.name().to_owned(),
        order_num: column.order_num(),
        created_at: column.created_at(),
        updated_at: column.updated_at(),
        deleted_at: column.deleted_at(),
    }
}

fn to_new_task_row(task: &Task) -> RepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        board_id: task.board_id().into_inner(),
        column_id: task.column_id().into_inner(),
        number: task.number(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        tags: task.tags().to_vec(),
        checklists: checklists_to_value(task.checklists())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    })
}

fn checklists_to_value(checklists: &[Checklist]) -> RepositoryResult<serde_json::Value> {
    serde_json::to_value(checklists).map_err(RepositoryError::persistence)
}

fn row_to_board(row: BoardRow) -> Board {
    Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        name: row.name,
        short_name: row.short_name,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

fn row_to_column(row: ColumnRow) -> Column {
    Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        name: row.name,
        order_num: row.order_num,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let checklists = serde_json::from_value::<Vec<Checklist>>(row.checklists)
        .map_err(RepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        column_id: ColumnId::from_uuid(row.column_id),
        number: row.number,
        title: row.title,
        description: row.description,
        tags: row.tags,
        checklists,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    }))
}
