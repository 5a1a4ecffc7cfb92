//! OpenAPI document. Request/response shapes owned by the service crate are
//! mirrored here as schema-only types.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(min_length = 8)]
    pub password: String,
    pub display_name: Option<String>,
    #[schema(example = "+628123456789")]
    pub phone_e164: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub is_service_account: Option<bool>,
    pub created_by: Option<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserViewDoc {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub phone_e164: Option<String>,
    pub locale: String,
    pub timezone: String,
    #[schema(example = "ACTIVE")]
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserViewDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UserViewDoc,
            LoginResponse,
            crate::routes::auth::RegisterResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
