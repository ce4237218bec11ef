use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    analytics::{self, Analytics},
    create_todo_request::CreateTodoRequest,
    dashboard::{self, Dashboard},
    data_access::data_context::DataContext,
    errors::{AppError, StoreError},
    policy,
    todo::Todo,
    todo_response::TodoResponse,
    update_todo_request::UpdateTodoRequest,
    user::User,
    user_summary::UserSummary,
};

pub const USER_SEARCH_MIN_CHARS: usize = 2;
pub const USER_SEARCH_LIMIT: usize = 10;

/// Todo operations on behalf of an explicit actor. Everything returned has
/// `created_by`/`assigned_to` joined to user summaries.
#[derive(Clone)]
pub struct TodoRepository {
    data_context: DataContext,
}

impl TodoRepository {
    pub fn new(data_context: DataContext) -> Self {
        Self { data_context }
    }

    pub fn create(
        &self,
        request: CreateTodoRequest,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Result<TodoResponse, AppError> {
        if let Some(assignee) = request.assigned_to {
            if assignee != actor && !self.data_context.user_exists(assignee)? {
                return Err(AppError::AssignedUserNotFound);
            }
        }

        let todo = Todo::create(request, actor, now)?;
        self.data_context.put_todo(&todo)?;
        tracing::info!(todo_id = %todo.id, %actor, assigned_to = %todo.assigned_to, "todo created");

        self.resolve_one(todo)
    }

    pub fn update(
        &self,
        id: Uuid,
        patch: UpdateTodoRequest,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Result<TodoResponse, AppError> {
        let mut reassigned = false;
        let updated = self
            .data_context
            .update_todo(id, |current, user_exists| {
                if !policy::can_modify(current, actor) {
                    return Err(AppError::Forbidden("Not authorized to modify this todo"));
                }

                if let Some(assignee) = patch.assigned_to {
                    if assignee != current.assigned_to && !user_exists(assignee)? {
                        return Err(AppError::AssignedUserNotFound);
                    }
                }

                let updated = current.apply_patch(&patch, actor, now)?;
                reassigned = updated.assigned_to != current.assigned_to;
                Ok(updated)
            })?
            .ok_or(AppError::TodoNotFound)?;
        tracing::info!(
            todo_id = %id,
            %actor,
            status = ?updated.status,
            reassigned,
            "todo updated"
        );

        self.resolve_one(updated)
    }

    pub fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), AppError> {
        let deleted = self.data_context.delete_todo_if(id, |todo| {
            if policy::can_delete(todo, actor) {
                Ok(())
            } else {
                Err(AppError::Forbidden("Only the creator can delete this todo"))
            }
        })?;

        if !deleted {
            return Err(AppError::TodoNotFound);
        }
        tracing::info!(todo_id = %id, %actor, "todo deleted");
        Ok(())
    }

    /// Todos the user created or was assigned, newest first.
    pub fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TodoResponse>, AppError> {
        let todos = self
            .data_context
            .list_todos_where(|t| t.created_by == user_id || t.assigned_to == user_id)?;
        self.resolve_many(todos)
    }

    /// Users `exclude` could hand a todo to. Queries under two characters
    /// return nothing.
    pub fn search_assignable_users(
        &self,
        query: &str,
        exclude: Uuid,
    ) -> Result<Vec<UserSummary>, AppError> {
        if query.chars().count() < USER_SEARCH_MIN_CHARS {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        let mut matches: Vec<User> = self
            .data_context
            .list_users()?
            .into_iter()
            .filter(|u| u.id != exclude && u.matches(&needle))
            .collect();
        matches.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));

        Ok(matches
            .iter()
            .take(USER_SEARCH_LIMIT)
            .map(User::to_summary)
            .collect())
    }

    pub fn dashboard(&self, user_id: Uuid) -> Result<Dashboard, AppError> {
        let todos = self.list_for_user(user_id)?;
        Ok(dashboard::build_dashboard(user_id, todos))
    }

    pub fn analytics(
        &self,
        user_id: Uuid,
        period_days: u64,
        now: DateTime<Utc>,
    ) -> Result<Analytics, AppError> {
        let since = analytics::window_start(now, period_days);
        let todos = self.data_context.list_todos_where(|t| {
            (t.created_by == user_id || t.assigned_to == user_id) && t.created_at >= since
        })?;
        let todos = self.resolve_many(todos)?;
        Ok(analytics::build_analytics(user_id, todos, period_days, now))
    }

    // ── User join ──────────────────────────────────────────────

    fn resolve_one(&self, todo: Todo) -> Result<TodoResponse, AppError> {
        let created_by = self.summary_for(todo.created_by)?;
        let assigned_to = if todo.assigned_to == todo.created_by {
            created_by.clone()
        } else {
            self.summary_for(todo.assigned_to)?
        };
        Ok(TodoResponse::new(todo, created_by, assigned_to))
    }

    fn resolve_many(&self, todos: Vec<Todo>) -> Result<Vec<TodoResponse>, AppError> {
        if todos.is_empty() {
            return Ok(Vec::new());
        }
        let users = self.data_context.users_by_id()?;
        todos
            .into_iter()
            .map(|todo| {
                let created_by = lookup(&users, todo.created_by)?;
                let assigned_to = lookup(&users, todo.assigned_to)?;
                Ok(TodoResponse::new(todo, created_by, assigned_to))
            })
            .collect()
    }

    fn summary_for(&self, id: Uuid) -> Result<UserSummary, AppError> {
        self.data_context
            .get_user(id)?
            .map(|u| u.to_summary())
            .ok_or(AppError::Store(StoreError::DanglingUser(id)))
    }
}

fn lookup(users: &HashMap<Uuid, User>, id: Uuid) -> Result<UserSummary, AppError> {
    users
        .get(&id)
        .map(User::to_summary)
        .ok_or(AppError::Store(StoreError::DanglingUser(id)))
}

// ── Tests ──────────────────────────────────────────────────────
