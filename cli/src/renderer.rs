//! Plain-text rendering of the store snapshot.

use std::fmt::Write;

use todo_sync::{StoreSnapshot, TodoItem};

pub fn render_item(item: &TodoItem) -> String {
    let mark = if item.completed { "x" } else { " " };
    let id = item.id.map_or_else(|| "-".to_string(), |id| id.to_string());
    let mut line = format!("[{mark}] {id:>4}  {}", item.title);
    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(line, " ({description})");
    }
    line
}

pub fn render(snapshot: &StoreSnapshot) -> String {
    if snapshot.items.is_empty() {
        return "No todos.".to_string();
    }
    let mut out = String::new();
    for item in &snapshot.items {
        out.push_str(&render_item(item));
        out.push('\n');
    }
    let done = snapshot.items.iter().filter(|item| item.completed).count();
    let _ = write!(out, "{done}/{} completed", snapshot.items.len());
    out
}
