use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    app_state::SharedState, data_access::data_context::DataContext, errors::{AppError, StoreError},
    login_request::LoginRequest, login_response::LoginResponse, settings::Settings, user::User,
    user_add_request::UserAddRequest,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

// ── Tokens & passwords ─────────────────────────────────────────

pub fn create_token(user: &User, settings: &Settings) -> Result<String, AppError> {
    let now = Utc::now();
    let expiry = Duration::try_minutes(settings.jwt_expiration_in_minutes)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::internal(format!(
                "jwt_expiration_in_minutes {} is out of range",
                settings.jwt_expiration_in_minutes
            ))
        })?;

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: claim_timestamp(expiry)?,
        iat: claim_timestamp(now)?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("token signing failed: {e}")))
}

fn claim_timestamp(at: DateTime<Utc>) -> Result<usize, AppError> {
    usize::try_from(at.timestamp())
        .map_err(|_| AppError::internal(format!("token timestamp {at} is out of range")))
}

pub fn verify_token(token: &str, settings: &Settings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// ── Account flows ──────────────────────────────────────────────

pub fn register(state: &SharedState, request: UserAddRequest) -> Result<LoginResponse, AppError> {
    let user = User::new(request)?;

    state.data_context.insert_user(&user).map_err(|e| match e {
        StoreError::UsernameTaken => AppError::validation("Username is already taken"),
        StoreError::EmailTaken => AppError::validation("Email is already registered"),
        other => AppError::Store(other),
    })?;
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(LoginResponse {
        token: create_token(&user, &state.settings)?,
        user: user.to_summary(),
    })
}

pub fn login(state: &SharedState, payload: LoginRequest) -> Result<LoginResponse, AppError> {
    let identifier = payload.username.trim();
    let user = match state.data_context.get_user_by_username(identifier)? {
        Some(user) => Some(user),
        None => state.data_context.get_user_by_email(identifier)?,
    }
    .ok_or(AppError::Unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(LoginResponse {
        token: create_token(&user, &state.settings)?,
        user: user.to_summary(),
    })
}

/// Create the configured admin account when the store has no users yet.
/// Returns true if one was created.
pub fn ensure_default_user(data_context: &DataContext, settings: &Settings) -> Result<bool, AppError> {
    if data_context.user_count()? > 0 {
        return Ok(false);
    }

    let admin = User::new(UserAddRequest {
        username: settings.default_admin_username.clone(),
        email: settings.default_admin_email.clone(),
        password: settings.default_admin_password.clone(),
    })?;
    data_context.insert_user(&admin)?;
    tracing::warn!(username = %admin.username, "created default admin user; change its password");
    Ok(true)
}

// ── Middleware ─────────────────────────────────────────────────

/// Resolve the bearer token to a `User` and hand it to the handler as a
/// request extension.
pub async fn auth_middleware(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized("Missing or invalid token"))?;

    let claims = verify_token(token, &state.settings)
        .map_err(|_| AppError::Unauthorized("Invalid token"))?;

    let user = state
        .data_context
        .get_user(claims.sub)?
        .ok_or(AppError::Unauthorized("User not found"))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
