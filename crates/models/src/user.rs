use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub email_verified_at: Option<DateTimeWithTimeZone>,
    pub phone_e164: Option<String>,
    pub phone_verified_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub password_hash: Option<String>,
    pub password_algorithm: String,
    pub password_updated_at: Option<DateTimeWithTimeZone>,
    pub must_change_password: bool,
    pub status: String,
    pub is_service_account: bool,
    pub display_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub avatar_url: Option<String>,
    pub locale: String,
    pub timezone: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub preferences: Json,
    pub mfa_enrolled: bool,
    pub mfa_default_method: Option<String>,
    pub last_login_at: Option<DateTimeWithTimeZone>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: Option<Uuid>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Find a non-deleted user by (already normalized) email.
pub async fn find_live_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email))
        .filter(Column::IsDeleted.eq(false))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a fully populated row. A duplicate live email surfaces as
/// [`ModelError::Conflict`].
pub async fn insert(db: &DatabaseConnection, am: ActiveModel) -> Result<Model, ModelError> {
    let created = am.insert(db).await?;
    Ok(created)
}
