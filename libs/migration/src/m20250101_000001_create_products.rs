use sea_orm_migration::{prelude::*, schema::*};

/// Longest product name accepted by the API.
const NAME_MAX_LEN: u32 = 20;

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
                    .col(string_len_uniq(Products::Name, NAME_MAX_LEN))
                    .col(integer(Products::Price).check(Expr::col(Products::Price).gte(1)))
                    .col(integer(Products::BuyingPrice).default(0))
                    .to_owned(),
            )
            .await?;

        // Price-floor queries filter on price.
        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Products::Table)
                    .col(Products::Price)
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
    Name,
    Price,
    BuyingPrice,
}
