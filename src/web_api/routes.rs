pub mod authentication_routes;
pub mod health_routes;
pub mod todo_routes;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::app_state::SharedState;

pub const API_PREFIX: &str = "/api";

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(health_routes::get_router())
        .merge(authentication_routes::get_router(app_state.clone()))
        .merge(todo_routes::get_router(app_state))
}

/// The whole service: API under `/api`, optional static frontend as the
/// fallback, permissive CORS and request tracing.
pub fn build_app(app_state: SharedState) -> Router {
    let static_dir = app_state.settings.static_dir.clone();
    let mut app = Router::new().nest(API_PREFIX, map_routes(app_state));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app.layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
