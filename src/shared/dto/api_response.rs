use serde::Serialize;

use crate::{todo_response::TodoResponse, user_summary::UserSummary};

/// Every successful body carries `success: true` next to its payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self { success: true, body }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoBody {
    pub todo: TodoResponse,
}

#[derive(Debug, Serialize)]
pub struct TodoListBody {
    pub todos: Vec<TodoResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserListBody {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}
