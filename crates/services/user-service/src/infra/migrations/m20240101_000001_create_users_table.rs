//! Migration: Create users table with case-insensitive unique email.
//!
//! Uniqueness lives on `email_normalized`, which the application fills with
//! the trimmed, Unicode-lowercased email. SQL `LOWER()` folds only ASCII on
//! SQLite and under the C collation on Postgres, so it is not used here.

use sea_orm_migration::prelude::*;

/// Index backing case-insensitive email uniqueness
pub const EMAIL_NORMALIZED_INDEX: &str = "idx_users_email_normalized";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::EmailNormalized).string().not_null())
                    .col(ColumnDef::new(Users::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(EMAIL_NORMALIZED_INDEX)
                    .table(Users::Table)
                    .col(Users::EmailNormalized)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table drops its indexes with it
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    EmailNormalized,
    DateOfBirth,
    PasswordHash,
    CreatedAt,
}
