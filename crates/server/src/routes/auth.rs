use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use service::auth::domain::{LoginInput, LoginResult, RegisterInput, User};
use service::auth::AuthService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub email: String,
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub locale: String,
    pub timezone: String,
}

impl From<&User> for RegisterResponse {
    fn from(u: &User) -> Self {
        Self {
            user_id: u.id,
            email: u.email.clone(),
            status: u.status.to_string(),
            locale: u.locale.clone(),
            timezone: u.timezone.clone(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = RegisterResponse),
        (status = 400, description = "Invalid input, malformed JSON or email already registered", body = String),
        (status = 500, description = "Internal error", body = String)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(input) = payload?;
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(&user))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = crate::openapi::LoginResponse),
        (status = 400, description = "Malformed JSON", body = String),
        (status = 401, description = "Invalid email or password", body = String),
        (status = 500, description = "Internal error", body = String)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginResult>, ApiError> {
    let Json(input) = payload?;
    let result = state.auth.login(input).await?;
    Ok(Json(result))
}
