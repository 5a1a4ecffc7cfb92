//! Create `user` table.
//!
//! One row per account: identity, credential, status, profile, MFA and audit
//! columns. Rows are soft-deleted through `is_deleted`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 320))
                    .col(timestamp_with_time_zone_null(User::EmailVerifiedAt))
                    .col(string_len_null(User::PhoneE164, 16))
                    .col(timestamp_with_time_zone_null(User::PhoneVerifiedAt))
                    .col(text_null(User::PasswordHash))
                    .col(string_len(User::PasswordAlgorithm, 32).default("argon2id"))
                    .col(timestamp_with_time_zone_null(User::PasswordUpdatedAt))
                    .col(boolean(User::MustChangePassword).default(false))
                    .col(string_len(User::Status, 16).default("PENDING"))
                    .col(boolean(User::IsServiceAccount).default(false))
                    .col(string_len_null(User::DisplayName, 255))
                    .col(text_null(User::AvatarUrl))
                    .col(string_len(User::Locale, 35))
                    .col(string_len(User::Timezone, 64))
                    .col(json_binary(User::Preferences))
                    .col(boolean(User::MfaEnrolled).default(false))
                    .col(string_len_null(User::MfaDefaultMethod, 16))
                    .col(timestamp_with_time_zone_null(User::LastLoginAt))
                    .col(string_len_null(User::LastLoginIp, 45))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(uuid_null(User::CreatedBy))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .col(uuid_null(User::UpdatedBy))
                    .col(boolean(User::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    EmailVerifiedAt,
    PhoneE164,
    PhoneVerifiedAt,
    PasswordHash,
    PasswordAlgorithm,
    PasswordUpdatedAt,
    MustChangePassword,
    Status,
    IsServiceAccount,
    DisplayName,
    AvatarUrl,
    Locale,
    Timezone,
    Preferences,
    MfaEnrolled,
    MfaDefaultMethod,
    LastLoginAt,
    LastLoginIp,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    IsDeleted,
}
