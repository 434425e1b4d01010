//! Migration: Create the places table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Places::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Places::Title).string().not_null())
                    .col(ColumnDef::new(Places::Description).text().not_null())
                    .col(ColumnDef::new(Places::Address).string().not_null())
                    .col(ColumnDef::new(Places::Lat).double().not_null())
                    .col(ColumnDef::new(Places::Lng).double().not_null())
                    .col(ColumnDef::new(Places::Image).string().not_null())
                    .col(ColumnDef::new(Places::ImageHandle).string().not_null())
                    .col(ColumnDef::new(Places::Creator).uuid().not_null())
                    .col(
                        ColumnDef::new(Places::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Places::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings filter by creator and sort by creation time descending
        manager
            .create_index(
                Index::create()
                    .name("idx_places_creator_created_at")
                    .table(Places::Table)
                    .col(Places::Creator)
                    .col(Places::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Places {
    Table,
    Id,
    Title,
    Description,
    Address,
    Lat,
    Lng,
    Image,
    ImageHandle,
    Creator,
    CreatedAt,
    UpdatedAt,
}
