use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No uniqueness on (email, purpose): concurrent issuance may briefly
        // leave two live codes, and either must verify.
        manager
            .create_table(
                Table::create()
                    .table(OtpCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtpCodes::Email).string().not_null())
                    .col(ColumnDef::new(OtpCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(OtpCodes::Purpose)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpCodes::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(OtpCodes::ConsumedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(OtpCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtpCodes {
    Table,
    Id,
    Email,
    Code,
    Purpose,
    Attempts,
    ConsumedAt,
    ExpiresAt,
    CreatedAt,
}
