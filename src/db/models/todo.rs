use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A todo as exposed over the API.
///
/// Keys keep the capitalized spelling existing clients use (`Title`,
/// `Description`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub id: i64,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Completed")]
    pub completed: bool,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `todos` table. `completed` is stored as an integer flag.
#[derive(Debug, sqlx::FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: i64,
    pub created_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed != 0,
            created_at: row.created_at,
        }
    }
}

/// Body of `POST /todos`. Missing or `null` fields fall back to empty / false;
/// `id` and `CreatedAt` are assigned by the store and ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default, deserialize_with = "null_as_default", rename = "Title", alias = "title")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "Description", alias = "description")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "Completed", alias = "completed")]
    pub completed: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `PUT /todos/{id}`: every mutable column, `CreatedAt` included.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
    #[serde(rename = "Completed", alias = "completed")]
    pub completed: bool,
    #[serde(rename = "CreatedAt", alias = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl UpdateTodoRequest {
    pub fn into_todo(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}
