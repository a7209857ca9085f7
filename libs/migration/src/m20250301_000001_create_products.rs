use sea_orm_migration::{prelude::*, schema::*};

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
                    .col(pk_auto(Products::Id))
                    .col(string(Products::ProductToken))
                    .col(string(Products::Name))
                    .col(double(Products::Price))
                    .col(integer(Products::Stock))
                    .to_owned(),
            )
            .await?;

        // Also covers concurrent creates that both pass the service's token lookup
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_product_token")
                    .table(Products::Table)
                    .col(Products::ProductToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    ProductToken,
    Name,
    Price,
    Stock,
}
