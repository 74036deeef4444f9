//! Data access for the `todos` table.
//!
//! Each method is one parameterized statement against the shared pool.
//! Nothing is cached; the table is the only source of truth.
use crate::db::models::todo::{CreateTodoRequest, Todo, TodoRow, UpdateTodoRequest};
use crate::db::DbPool;

#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: DbPool,
}

impl TodoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, completed, created_at
             FROM todos ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Todo>, sqlx::Error> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, completed, created_at
             FROM todos WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    /// Inserts a row and returns the id the database assigned to it.
    pub async fn create(&self, req: &CreateTodoRequest) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO todos (title, description, completed) VALUES (?, ?, ?)"
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.completed as i64)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites every mutable column, `created_at` included.
    /// Returns the number of rows matched (0 or 1).
    pub async fn update(&self, id: i64, req: &UpdateTodoRequest) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?, description = ?, completed = ?, created_at = ?
             WHERE id = ?"
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.completed as i64)
        .bind(req.created_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed; deleting a missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, MEMORY_DB_PATH};
    use chrono::{TimeZone, Utc};

    async fn store() -> TodoStore {
        let pool = crate::db::init(&DatabaseConfig {
            path: MEMORY_DB_PATH.to_string(),
            max_connections: 1,
        })
        .await
        .expect("in-memory database");
        TodoStore::new(pool)
    }

    fn new_todo(title: &str, completed: bool) -> CreateTodoRequest {
        CreateTodoRequest {
            title: title.to_string(),
            description: format!("{} details", title),
            completed,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = store().await;
        assert_eq!(store.create(&new_todo("a", false)).await.unwrap(), 1);
        assert_eq!(store.create(&new_todo("b", false)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_returns_inserted_fields() {
        let store = store().await;
        let id = store.create(&new_todo("buy milk", true)).await.unwrap();

        let todo = store.get(id).await.unwrap().expect("row exists");
        assert_eq!(todo.id, id);
        assert_eq!(todo.title, "buy milk");
        assert_eq!(todo.description, "buy milk details");
        assert!(todo.completed);
        assert!((Utc::now() - todo.created_at).num_seconds().abs() < 60);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store().await;
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());

        store.create(&new_todo("first", false)).await.unwrap();
        store.create(&new_todo("second", true)).await.unwrap();

        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "first");
        assert_eq!(todos[1].title, "second");
    }

    #[tokio::test]
    async fn test_update_overwrites_created_at() {
        let store = store().await;
        let id = store.create(&new_todo("old", false)).await.unwrap();
        let when = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap();

        let matched = store
            .update(
                id,
                &UpdateTodoRequest {
                    title: "new".into(),
                    description: "changed".into(),
                    completed: true,
                    created_at: when,
                },
            )
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let todo = store.get(id).await.unwrap().unwrap();
        assert_eq!(todo.title, "new");
        assert_eq!(todo.description, "changed");
        assert!(todo.completed);
        assert_eq!(todo.created_at, when);
    }

    #[tokio::test]
    async fn test_update_missing_matches_nothing() {
        let store = store().await;
        let matched = store
            .update(
                9,
                &UpdateTodoRequest {
                    title: "x".into(),
                    description: "y".into(),
                    completed: false,
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        assert_eq!(matched, 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = store().await;
        let id = store.create(&new_todo("gone", false)).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(store().await.ping().await.is_ok());
    }
}
