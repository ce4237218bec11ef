use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api_response::ErrorResponse;

// ── Storage errors ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redb: {0}")]
    Redb(#[from] redb::Error),
    #[error("encode: {0}")]
    Encode(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("dangling user reference {0}")]
    DanglingUser(Uuid),
    #[error("username is already taken")]
    UsernameTaken,
    #[error("email is already registered")]
    EmailTaken,
}

// redb 2.x has many error types. Funnel them all through redb::Error.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.into()) }
        })*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

// ── Application errors ─────────────────────────────────────────

/// Every failure a request can end in. Mapped onto a status code at the
/// HTTP boundary; nothing below the controllers knows about HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Assigned user not found")]
    AssignedUserNotFound,
    #[error("Todo not found")]
    TodoNotFound,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::AssignedUserNotFound => StatusCode::BAD_REQUEST,
            AppError::TodoNotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::AssignedUserNotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TodoNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Unauthorized("no").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Store(StoreError::Decode("truncated".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(AppError::TodoNotFound.to_string(), "Todo not found");
        assert_eq!(AppError::AssignedUserNotFound.to_string(), "Assigned user not found");
        assert_eq!(
            AppError::Forbidden("Only the creator can delete this todo").to_string(),
            "Only the creator can delete this todo"
        );
    }
}
