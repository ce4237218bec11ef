use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{field_parsing, todo_priority::TodoPriority, todo_status::TodoStatus};

/// Partial update. Unknown fields (a client echoing back a whole todo)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "field_parsing::patch_timestamp")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "field_parsing::user_ref")]
    pub assigned_to: Option<Uuid>,
    pub assignment_note: Option<String>,
}
