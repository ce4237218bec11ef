use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    todo::{StatusChange, Todo},
    todo_priority::TodoPriority,
    todo_status::TodoStatus,
    user_summary::UserSummary,
};

/// A todo with its user references joined to summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: UserSummary,
    pub assigned_to: UserSummary,
    pub assignment_note: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub status_history: Vec<StatusChange>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoResponse {
    pub fn new(todo: Todo, created_by: UserSummary, assigned_to: UserSummary) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            priority: todo.priority,
            category: todo.category,
            due_date: todo.due_date,
            created_by,
            assigned_to,
            assignment_note: todo.assignment_note,
            assigned_at: todo.assigned_at,
            status_history: todo.status_history,
            completed_at: todo.completed_at,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
