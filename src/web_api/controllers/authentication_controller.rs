use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    api_response::{ApiResponse, UserBody},
    app_state::SharedState,
    authentication::auth,
    errors::AppError,
    login_request::LoginRequest,
    login_response::LoginResponse,
    user::User,
    user_add_request::UserAddRequest,
};

pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn register(
        State(state): State<SharedState>,
        body: Result<Json<UserAddRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), AppError> {
        let Json(request) = body.map_err(|r| AppError::validation(r.body_text()))?;
        let response = auth::register(&state, request)?;
        Ok((StatusCode::CREATED, Json(ApiResponse::ok(response))))
    }

    pub async fn login(
        State(state): State<SharedState>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
        let Json(payload) = body.map_err(|r| AppError::validation(r.body_text()))?;
        let response = auth::login(&state, payload)?;
        Ok(Json(ApiResponse::ok(response)))
    }

    pub async fn me(Extension(user): Extension<User>) -> Json<ApiResponse<UserBody>> {
        Json(ApiResponse::ok(UserBody {
            user: user.to_summary(),
        }))
    }
}
