use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    analytics::Analytics,
    api_response::{ApiResponse, MessageBody, TodoBody, TodoListBody, UserListBody},
    app_state::SharedState,
    create_todo_request::CreateTodoRequest,
    dashboard::Dashboard,
    errors::AppError,
    todo_queries::{AnalyticsQuery, UserSearchQuery},
    update_todo_request::UpdateTodoRequest,
    user::User,
};

pub struct TodoController {}

impl TodoController {
    pub async fn dashboard(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> Result<Json<ApiResponse<Dashboard>>, AppError> {
        let dashboard = state.todos.dashboard(user.id)?;
        Ok(Json(ApiResponse::ok(dashboard)))
    }

    pub async fn analytics(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        query: Result<Query<AnalyticsQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<Analytics>>, AppError> {
        let Query(query) = query.map_err(|r| AppError::validation(r.body_text()))?;
        let analytics = state.todos.analytics(user.id, query.period_days(), Utc::now())?;
        Ok(Json(ApiResponse::ok(analytics)))
    }

    pub async fn search_users(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        query: Result<Query<UserSearchQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<UserListBody>>, AppError> {
        let Query(query) = query.map_err(|r| AppError::validation(r.body_text()))?;
        let users = state.todos.search_assignable_users(&query.query, user.id)?;
        Ok(Json(ApiResponse::ok(UserListBody { users })))
    }

    pub async fn list(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> Result<Json<ApiResponse<TodoListBody>>, AppError> {
        let todos = state.todos.list_for_user(user.id)?;
        Ok(Json(ApiResponse::ok(TodoListBody { todos })))
    }

    pub async fn create(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        body: Result<Json<CreateTodoRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<ApiResponse<TodoBody>>), AppError> {
        let Json(request) = body.map_err(|r| AppError::validation(r.body_text()))?;
        let todo = state.todos.create(request, user.id, Utc::now())?;
        Ok((StatusCode::CREATED, Json(ApiResponse::ok(TodoBody { todo }))))
    }

    pub async fn update(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        id: Result<Path<Uuid>, PathRejection>,
        body: Result<Json<UpdateTodoRequest>, JsonRejection>,
    ) -> Result<Json<ApiResponse<TodoBody>>, AppError> {
        let Path(id) = id.map_err(|r| AppError::validation(r.body_text()))?;
        let Json(patch) = body.map_err(|r| AppError::validation(r.body_text()))?;
        let todo = state.todos.update(id, patch, user.id, Utc::now())?;
        Ok(Json(ApiResponse::ok(TodoBody { todo })))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        id: Result<Path<Uuid>, PathRejection>,
    ) -> Result<Json<ApiResponse<MessageBody>>, AppError> {
        let Path(id) = id.map_err(|r| AppError::validation(r.body_text()))?;
        state.todos.delete(id, user.id)?;
        Ok(Json(ApiResponse::ok(MessageBody {
            message: "Todo deleted successfully".to_string(),
        })))
    }
}
