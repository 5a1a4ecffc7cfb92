use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;

/// HTTP-facing error. Bodies are plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(_) | AuthError::Conflict | AuthError::InvalidTransition { .. } => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::InvalidCredential => ApiError::Unauthorized(e.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                // the cause stays in the logs, never in the response
                error!(code = e.code(), error = %e, "request failed");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::auth::domain::UserStatus;

    #[test]
    fn auth_errors_map_to_status_codes() {
        let cases = [
            (AuthError::Validation("invalid email".into()), StatusCode::BAD_REQUEST, "invalid email"),
            (AuthError::Conflict, StatusCode::BAD_REQUEST, "email already registered"),
            (
                AuthError::InvalidTransition { from: UserStatus::Deleted, to: UserStatus::Active },
                StatusCode::BAD_REQUEST,
                "status transition DELETED -> ACTIVE not allowed",
            ),
            (AuthError::InvalidCredential, StatusCode::UNAUTHORIZED, "invalid email or password"),
            (AuthError::HashError("oom".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
            (AuthError::TokenError("no key".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
            (AuthError::Repository("db down".into()), StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        ];
        for (err, status, body) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status(), status);
            assert_eq!(api.to_string(), body);
        }
    }
}
