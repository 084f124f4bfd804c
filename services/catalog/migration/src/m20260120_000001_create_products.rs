use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::Title).string().not_null())
                    .col(
                        ColumnDef::new(Products::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Products::ShortDescription).string())
                    .col(ColumnDef::new(Products::FullDetails).text())
                    .col(
                        ColumnDef::new(Products::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Products::DiscountPrice).decimal_len(12, 2))
                    .col(
                        ColumnDef::new(Products::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::Sku).string().unique_key())
                    .col(
                        ColumnDef::new(Products::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::ViewsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Public listing filters on is_active and sorts by created_at.
        manager
            .create_index(
                Index::create()
                    .table(Products::Table)
                    .col(Products::IsActive)
                    .col(Products::CreatedAt)
                    .name("idx_products_is_active_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_products_is_active_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Title,
    Slug,
    ShortDescription,
    FullDetails,
    Price,
    DiscountPrice,
    Quantity,
    Sku,
    IsActive,
    ViewsCount,
    CreatedAt,
    UpdatedAt,
}
