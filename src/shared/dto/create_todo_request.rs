use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{field_parsing, todo_priority::TodoPriority};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    // Missing title is reported by validation, not by the decoder.
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "field_parsing::user_ref")]
    pub assigned_to: Option<Uuid>,
    pub assignment_note: Option<String>,
    pub priority: Option<TodoPriority>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "field_parsing::optional_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
}
