use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::{app_state::SharedState, authentication::auth::auth_middleware, todo_controller::TodoController};

pub const ROUTER_PATH: &str = "/todos";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(format!("{}/dashboard", ROUTER_PATH).as_str(), get(TodoController::dashboard))
        .route(format!("{}/analytics", ROUTER_PATH).as_str(), get(TodoController::analytics))
        .route(format!("{}/users/search", ROUTER_PATH).as_str(), get(TodoController::search_users))
        .route(ROUTER_PATH, get(TodoController::list).post(TodoController::create))
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            put(TodoController::update).delete(TodoController::delete),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
