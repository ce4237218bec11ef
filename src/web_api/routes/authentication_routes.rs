use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    app_state::SharedState, authentication::auth::auth_middleware,
    authentication_controller::AuthenticationController,
};

pub const ROUTER_PATH: &str = "/auth";

pub fn get_router(app_state: SharedState) -> Router {
    let public = Router::new()
        .route(format!("{}/register", ROUTER_PATH).as_str(), post(AuthenticationController::register))
        .route(format!("{}/login", ROUTER_PATH).as_str(), post(AuthenticationController::login));

    let protected = Router::new()
        .route(format!("{}/me", ROUTER_PATH).as_str(), get(AuthenticationController::me))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    public.merge(protected).with_state(app_state)
}
