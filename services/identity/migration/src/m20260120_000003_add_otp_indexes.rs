use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Verification and delete-old both filter on (email, purpose);
        // the sweeper filters on expires_at.
        manager
            .create_index(
                Index::create()
                    .table(OtpCodes::Table)
                    .col(OtpCodes::Email)
                    .col(OtpCodes::Purpose)
                    .name("idx_otp_codes_email_purpose")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OtpCodes::Table)
                    .col(OtpCodes::ExpiresAt)
                    .name("idx_otp_codes_expires_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_otp_codes_expires_at").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_otp_codes_email_purpose")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum OtpCodes {
    Table,
    Email,
    Purpose,
    ExpiresAt,
}
