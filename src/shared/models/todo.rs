use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    create_todo_request::CreateTodoRequest, errors::AppError, todo_priority::TodoPriority,
    todo_status::TodoStatus, update_todo_request::UpdateTodoRequest,
};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const CATEGORY_MAX_CHARS: usize = 50;
pub const ASSIGNMENT_NOTE_MAX_CHARS: usize = 200;

/// One entry of the append-only status log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: TodoStatus,
    pub changed_by: Uuid,
    pub changed_at: DateTime<Utc>,
}

/// A todo as stored. User references are bare ids here; the repository
/// joins them to summaries before anything leaves the server.
///
/// Stored with postcard, so no serde attributes that skip or reorder fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub assigned_to: Uuid,
    pub assignment_note: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub status_history: Vec<StatusChange>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a new todo owned by `created_by`. The initial `pending` status is
    /// recorded as the first history entry.
    ///
    /// Does not check that the assignee exists; that needs the store.
    pub fn create(
        request: CreateTodoRequest,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Todo, AppError> {
        let title = required_text("Title", &request.title, TITLE_MAX_CHARS)?;
        let description =
            optional_text("Description", request.description.as_deref(), DESCRIPTION_MAX_CHARS)?;
        let category = optional_text("Category", request.category.as_deref(), CATEGORY_MAX_CHARS)?;

        let assigned_to = request.assigned_to.unwrap_or(created_by);
        let assignment_note = if assigned_to == created_by {
            None
        } else {
            optional_text(
                "Assignment note",
                request.assignment_note.as_deref(),
                ASSIGNMENT_NOTE_MAX_CHARS,
            )?
        };

        let mut todo = Todo {
            id: Uuid::new_v4(),
            title,
            description,
            status: TodoStatus::Pending,
            priority: request.priority.unwrap_or_default(),
            category,
            due_date: request.due_date,
            created_by,
            assigned_to,
            assignment_note,
            assigned_at: now,
            status_history: Vec::new(),
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        todo.apply_status_change(TodoStatus::Pending, created_by, now);
        Ok(todo)
    }

    /// Record a status transition: append to the history and derive
    /// `completed_at`. Callers invoke this once per actual change.
    ///
    /// History timestamps never go backwards; an `at` older than the last
    /// entry is clamped to it.
    pub fn apply_status_change(&mut self, new_status: TodoStatus, changed_by: Uuid, at: DateTime<Utc>) {
        let at = match self.status_history.last() {
            Some(last) if last.changed_at > at => last.changed_at,
            _ => at,
        };

        self.status_history.push(StatusChange {
            status: new_status,
            changed_by,
            changed_at: at,
        });
        self.status = new_status;
        self.completed_at = new_status.is_completed().then_some(at);
    }

    /// Apply a partial update, returning the patched copy. `self` is left
    /// untouched, so a rejected patch never half-writes the record.
    pub fn apply_patch(
        &self,
        patch: &UpdateTodoRequest,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Todo, AppError> {
        let mut next = self.clone();

        if let Some(title) = &patch.title {
            next.title = required_text("Title", title, TITLE_MAX_CHARS)?;
        }
        if let Some(description) = &patch.description {
            next.description =
                optional_text("Description", Some(description.as_str()), DESCRIPTION_MAX_CHARS)?;
        }
        if let Some(category) = &patch.category {
            next.category = optional_text("Category", Some(category.as_str()), CATEGORY_MAX_CHARS)?;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }

        // assigned_at only moves when the assignee really changes.
        if let Some(assignee) = patch.assigned_to {
            if assignee != next.assigned_to {
                next.assigned_to = assignee;
                next.assigned_at = now;
            }
        }
        if let Some(note) = &patch.assignment_note {
            next.assignment_note =
                optional_text("Assignment note", Some(note.as_str()), ASSIGNMENT_NOTE_MAX_CHARS)?;
        }
        if next.assigned_to == next.created_by {
            next.assignment_note = None;
        }

        if let Some(status) = patch.status {
            if status != next.status {
                next.apply_status_change(status, actor, now);
            }
        }

        next.updated_at = now;
        Ok(next)
    }
}

// ── Validation helpers ─────────────────────────────────────────

fn required_text(field: &str, value: &str, max_chars: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Blank input clears the field.
fn optional_text(field: &str, value: Option<&str>, max_chars: usize) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, max_chars)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn check_length(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.chars().count() > max_chars {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
