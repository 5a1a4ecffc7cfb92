use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Email is unique among live accounts only, so a soft-deleted address can be
// registered again. sea-query has no partial index builder, hence raw SQL.
const CREATE_UNIQUE_EMAIL: &str =
    r#"CREATE UNIQUE INDEX IF NOT EXISTS "uniq_user_email_live" ON "user" ("email") WHERE "is_deleted" = FALSE"#;
const DROP_UNIQUE_EMAIL: &str = r#"DROP INDEX IF EXISTS "uniq_user_email_live""#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_UNIQUE_EMAIL)
            .await?;

        // User: index on status
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_status")
                    .table(User::Table)
                    .col(User::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_status").table(User::Table).to_owned())
            .await?;
        manager
            .get_connection()
            .execute_unprepared(DROP_UNIQUE_EMAIL)
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User { Table, Status }
