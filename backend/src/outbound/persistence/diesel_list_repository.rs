//! PostgreSQL-backed `ListRepository` implementation using Diesel ORM.
//!
//! Ids come from `SERIAL` columns, so todo ids are unique across all lists
//! rather than numbered per list. Deleting a list cascades to its todos in
//! the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ListRepository, ListRepositoryError};
use crate::domain::{ListId, ListName, Todo, TodoId, TodoList, TodoName};

use super::models::{ListRow, NewListRow, NewTodoRow, TodoRow};
use super::pool::{DbPool, PoolError};
use super::schema::{lists, todos};

/// Diesel-backed implementation of the `ListRepository` port.
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListRepositoryError {
    ListRepositoryError::connection(error.message())
}

fn map_diesel_error(error: DieselError) -> ListRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ListRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => ListRepositoryError::query("database query error"),
        _ => ListRepositoryError::query("database error"),
    }
}

/// A unique violation on `lists.name` means another list took the name.
fn map_name_write_error(error: DieselError, name: &ListName) -> ListRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ListRepositoryError::duplicate_name(name.to_string())
        }
        other => map_diesel_error(other),
    }
}

/// Domain ids never exceed `i32::MAX` in the database; larger ids cannot
/// match a row.
fn db_id(raw: u32) -> Option<i32> {
    i32::try_from(raw).ok()
}

fn list_db_id(id: ListId) -> Result<i32, ListRepositoryError> {
    db_id(id.get()).ok_or_else(|| ListRepositoryError::list_not_found(id.get()))
}

fn todo_db_id(list_id: ListId, todo_id: TodoId) -> Result<i32, ListRepositoryError> {
    db_id(todo_id.get())
        .ok_or_else(|| ListRepositoryError::todo_not_found(list_id.get(), todo_id.get()))
}

fn domain_id(raw: i32) -> Result<u32, ListRepositoryError> {
    u32::try_from(raw).map_err(|_| ListRepositoryError::query(format!("negative id {raw}")))
}

fn row_to_todo(row: TodoRow) -> Result<Todo, ListRepositoryError> {
    let name = TodoName::new(row.name)
        .map_err(|error| ListRepositoryError::query(format!("stored todo {}: {error}", row.id)))?;
    Ok(Todo {
        id: TodoId::new(domain_id(row.id)?),
        name,
        completed: row.completed,
    })
}

fn row_to_list(row: ListRow, todo_rows: Vec<TodoRow>) -> Result<TodoList, ListRepositoryError> {
    let name = ListName::new(row.name)
        .map_err(|error| ListRepositoryError::query(format!("stored list {}: {error}", row.id)))?;
    let todos = todo_rows
        .into_iter()
        .map(row_to_todo)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TodoList::from_parts(
        ListId::new(domain_id(row.id)?),
        name,
        todos,
    ))
}

/// Group todo rows under their lists, keeping the row order of both.
///
/// Todos whose list is absent are dropped.
pub(crate) fn assemble_lists(
    list_rows: Vec<ListRow>,
    todo_rows: Vec<TodoRow>,
) -> Result<Vec<TodoList>, ListRepositoryError> {
    let mut grouped: Vec<(ListRow, Vec<TodoRow>)> =
        list_rows.into_iter().map(|row| (row, Vec::new())).collect();
    for todo in todo_rows {
        if let Some((_, todos)) = grouped.iter_mut().find(|(list, _)| list.id == todo.list_id) {
            todos.push(todo);
        }
    }
    grouped
        .into_iter()
        .map(|(list, todos)| row_to_list(list, todos))
        .collect()
}

async fn load_list(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> Result<Option<(ListRow, Vec<TodoRow>)>, DieselError> {
    let Some(list) = lists::table
        .find(id)
        .select(ListRow::as_select())
        .first(conn)
        .await
        .optional()?
    else {
        return Ok(None);
    };
    let todo_rows = todos::table
        .filter(todos::list_id.eq(id))
        .order_by(todos::id)
        .select(TodoRow::as_select())
        .load(conn)
        .await?;
    Ok(Some((list, todo_rows)))
}

async fn list_exists(conn: &mut AsyncPgConnection, id: i32) -> Result<bool, DieselError> {
    diesel::select(diesel::dsl::exists(lists::table.find(id)))
        .get_result(conn)
        .await
}

impl DieselListRepository {
    /// Distinguish a missing list from a missing todo after a todo write
    /// matched no rows.
    async fn missing_todo(
        conn: &mut AsyncPgConnection,
        list_id: ListId,
        todo_id: TodoId,
        db_list_id: i32,
    ) -> ListRepositoryError {
        match list_exists(conn, db_list_id).await {
            Ok(true) => ListRepositoryError::todo_not_found(list_id.get(), todo_id.get()),
            Ok(false) => ListRepositoryError::list_not_found(list_id.get()),
            Err(error) => map_diesel_error(error),
        }
    }

    async fn find_existing(
        conn: &mut AsyncPgConnection,
        id: ListId,
    ) -> Result<TodoList, ListRepositoryError> {
        let db_list_id = list_db_id(id)?;
        let (list, todo_rows) = load_list(conn, db_list_id)
            .await
            .map_err(map_diesel_error)?
            .ok_or_else(|| ListRepositoryError::list_not_found(id.get()))?;
        row_to_list(list, todo_rows)
    }
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn all_lists(&self) -> Result<Vec<TodoList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // One transaction so lists and todos come from the same snapshot.
        let (list_rows, todo_rows) = conn
            .transaction(|conn| {
                async move {
                    let list_rows: Vec<ListRow> = lists::table
                        .order_by(lists::id)
                        .select(ListRow::as_select())
                        .load(conn)
                        .await?;
                    let todo_rows: Vec<TodoRow> = todos::table
                        .order_by((todos::list_id, todos::id))
                        .select(TodoRow::as_select())
                        .load(conn)
                        .await?;
                    Ok::<_, DieselError>((list_rows, todo_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        assemble_lists(list_rows, todo_rows)
    }

    async fn find_list(&self, id: ListId) -> Result<TodoList, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        Self::find_existing(&mut conn, id).await
    }

    async fn create_list(&self, name: &ListName) -> Result<TodoList, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(lists::table)
            .values(NewListRow {
                name: name.as_ref(),
            })
            .returning(ListRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_name_write_error(error, name))?;
        row_to_list(row, Vec::new())
    }

    async fn rename_list(
        &self,
        id: ListId,
        name: &ListName,
    ) -> Result<TodoList, ListRepositoryError> {
        let db_list_id = list_db_id(id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_name: &str = name.as_ref();
        let updated = diesel::update(lists::table.find(db_list_id))
            .set(lists::name.eq(new_name))
            .execute(&mut conn)
            .await
            .map_err(|error| map_name_write_error(error, name))?;
        if updated == 0 {
            return Err(ListRepositoryError::list_not_found(id.get()));
        }
        Self::find_existing(&mut conn, id).await
    }

    async fn delete_list(&self, id: ListId) -> Result<(), ListRepositoryError> {
        let db_list_id = list_db_id(id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(lists::table.find(db_list_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(ListRepositoryError::list_not_found(id.get()));
        }
        Ok(())
    }

    async fn create_todo(
        &self,
        list_id: ListId,
        name: &TodoName,
    ) -> Result<Todo, ListRepositoryError> {
        let db_list_id = list_db_id(list_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(todos::table)
            .values(NewTodoRow {
                list_id: db_list_id,
                name: name.as_ref(),
            })
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match error {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    ListRepositoryError::list_not_found(list_id.get())
                }
                other => map_diesel_error(other),
            })?;
        row_to_todo(row)
    }

    async fn delete_todo(
        &self,
        list_id: ListId,
        todo_id: TodoId,
    ) -> Result<(), ListRepositoryError> {
        let db_list_id = list_db_id(list_id)?;
        let db_todo_id = todo_db_id(list_id, todo_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            todos::table
                .filter(todos::id.eq(db_todo_id))
                .filter(todos::list_id.eq(db_list_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(Self::missing_todo(&mut conn, list_id, todo_id, db_list_id).await);
        }
        Ok(())
    }

    async fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, ListRepositoryError> {
        let db_list_id = list_db_id(list_id)?;
        let db_todo_id = todo_db_id(list_id, todo_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            todos::table
                .filter(todos::id.eq(db_todo_id))
                .filter(todos::list_id.eq(db_list_id)),
        )
        .set(todos::completed.eq(completed))
        .returning(TodoRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        match row {
            Some(row) => row_to_todo(row),
            None => Err(Self::missing_todo(&mut conn, list_id, todo_id, db_list_id).await),
        }
    }

    async fn complete_all_todos(&self, list_id: ListId) -> Result<TodoList, ListRepositoryError> {
        let db_list_id = list_db_id(list_id)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let loaded = conn
            .transaction(|conn| {
                async move {
                    diesel::update(todos::table.filter(todos::list_id.eq(db_list_id)))
                        .set(todos::completed.eq(true))
                        .execute(conn)
                        .await?;
                    load_list(conn, db_list_id).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        let (list, todo_rows) =
            loaded.ok_or_else(|| ListRepositoryError::list_not_found(list_id.get()))?;
        row_to_list(list, todo_rows)
    }
}

#[cfg(test)]
mod tests {
    //! Row assembly and error mapping; queries themselves need a database.
    use super::*;
    use rstest::rstest;

    fn list_row(id: i32, name: &str) -> ListRow {
        ListRow {
            id,
            name: name.to_owned(),
        }
    }

    fn todo_row(id: i32, list_id: i32, name: &str, completed: bool) -> TodoRow {
        TodoRow {
            id,
            list_id,
            name: name.to_owned(),
            completed,
        }
    }

    #[rstest]
    fn todos_are_grouped_under_their_lists() {
        let lists = assemble_lists(
            vec![list_row(1, "Home"), list_row(3, "Work")],
            vec![
                todo_row(2, 1, "Sweep", false),
                todo_row(5, 3, "Email", true),
                todo_row(7, 1, "Dust", true),
                todo_row(9, 8, "Orphan", false),
            ],
        )
        .expect("valid rows");

        assert_eq!(lists.len(), 2);
        let home = &lists[0];
        assert_eq!(home.id(), ListId::new(1));
        let names: Vec<&str> = home.todos().iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ["Sweep", "Dust"]);
        assert_eq!(home.todos_remaining_count(), 1);
        let work = &lists[1];
        assert!(work.is_complete());
        assert_eq!(work.todos()[0].id, TodoId::new(5));
    }

    #[rstest]
    #[case(list_row(-1, "Home"))]
    #[case(list_row(1, ""))]
    fn corrupt_rows_are_query_errors(#[case] row: ListRow) {
        let error = assemble_lists(vec![row], Vec::new()).expect_err("corrupt row");
        assert!(matches!(error, ListRepositoryError::Query { .. }));
    }

    #[rstest]
    fn oversized_ids_cannot_match_rows() {
        let id = ListId::new(u32::MAX);
        assert_eq!(
            list_db_id(id),
            Err(ListRepositoryError::list_not_found(u32::MAX))
        );
        assert_eq!(list_db_id(ListId::new(12)), Ok(12));
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("gone")),
        ));
        assert!(matches!(error, ListRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_names() {
        let name = ListName::new("Home").expect("valid name");
        let error = map_name_write_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(String::from("lists_name_key")),
            ),
            &name,
        );
        assert_eq!(error, ListRepositoryError::duplicate_name("Home"));
    }
}
