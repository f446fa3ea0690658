use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Body accepted by POST and PUT. Client-sent `id` and timestamps are
/// ignored; the server owns them.
#[derive(Debug, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Default)]
pub struct Db {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(replace_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn validate(input: &TodoInput) -> Result<(), StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    Ok(())
}

async fn list_todos(State(db): State<SharedDb>) -> Json<Vec<Todo>> {
    let db = db.read().await;
    Json(db.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<SharedDb>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    validate(&input)?;
    let mut db = db.write().await;
    db.next_id += 1;
    let stamp = now();
    let todo = Todo {
        id: db.next_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    debug!(id = todo.id, "created todo");
    db.todos.insert(todo.id, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn replace_todo(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    validate(&input)?;
    let mut db = db.write().await;
    let todo = db.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.updated_at = now();
    debug!(id, completed = todo.completed, "replaced todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut db = db.write().await;
    db.todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
