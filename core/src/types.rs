//! Domain model for the todo API.
//!
//! # Design
//! A single `TodoItem` type serves both directions of the wire. Drafts built
//! on the client carry `id: None` and no timestamps; the server fills those
//! in and its copy replaces the draft. Field names follow the API's
//! camelCase JSON (`createdAt`, `updatedAt`).

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo.
pub type TodoId = i64;

/// A todo item as exchanged with the API and held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default)]
    pub id: Option<TodoId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TodoItem {
    /// Build a draft that has not been sent to the server yet.
    pub fn draft(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Full copy with `completed` inverted. Every other field, timestamps
    /// included, is carried over so the result can be sent as a full PUT.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_fields() {
        let item = TodoItem {
            id: Some(7),
            title: "Write docs".to_string(),
            description: Some("README first".to_string()),
            completed: true,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            updated_at: Some("2024-01-02T00:00:00Z".to_string()),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Write docs");
        assert_eq!(json["description"], "README first");
        assert_eq!(json["completed"], true);
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2024-01-02T00:00:00Z");
    }

    #[test]
    fn draft_serializes_nulls_for_server_fields() {
        let json = serde_json::to_value(TodoItem::draft("Buy milk")).unwrap();
        assert!(json["id"].is_null());
        assert!(json["createdAt"].is_null());
        assert!(json["updatedAt"].is_null());
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn missing_optional_fields_decode_to_defaults() {
        let item: TodoItem = serde_json::from_str(r#"{"id":3,"title":"Minimal"}"#).unwrap();
        assert_eq!(item.id, Some(3));
        assert!(item.description.is_none());
        assert!(!item.completed);
        assert!(item.created_at.is_none());
    }

    #[test]
    fn missing_title_is_rejected() {
        let result: Result<TodoItem, _> = serde_json::from_str(r#"{"id":1,"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn toggled_preserves_everything_but_completed() {
        let item = TodoItem {
            id: Some(1),
            title: "Walk dog".to_string(),
            description: Some("around the block".to_string()),
            completed: false,
            created_at: Some("c".to_string()),
            updated_at: Some("u".to_string()),
        };
        let toggled = item.toggled();
        assert!(toggled.completed);
        assert_eq!(toggled.toggled(), item);
        assert_eq!(toggled.created_at.as_deref(), Some("c"));
        assert_eq!(toggled.updated_at.as_deref(), Some("u"));
    }

    #[test]
    fn draft_builder() {
        let draft = TodoItem::draft("Plan trip").with_description("book hotel");
        assert!(draft.is_draft());
        assert!(!draft.completed);
        assert_eq!(draft.description.as_deref(), Some("book hotel"));
    }
}
