use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchResults::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchResults::NasaId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SearchResults::Title).string().not_null())
                    .col(ColumnDef::new(SearchResults::Description).text().not_null())
                    .col(ColumnDef::new(SearchResults::ImageUrl).string().not_null())
                    .col(
                        ColumnDef::new(SearchResults::ThumbnailUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SearchResults::Keywords).text().not_null())
                    .col(ColumnDef::new(SearchResults::Center).string().null())
                    .col(ColumnDef::new(SearchResults::DateCreated).string().null())
                    .col(ColumnDef::new(SearchResults::MediaType).string().not_null())
                    .col(ColumnDef::new(SearchResults::Query).string().not_null())
                    .col(ColumnDef::new(SearchResults::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SearchQueries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchQueries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchQueries::Query)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SearchQueries::SearchCount)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SearchQueries::LastSearched)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchQueries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SearchResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchResults {
    Table,
    Id,
    NasaId,
    Title,
    Description,
    ImageUrl,
    ThumbnailUrl,
    Keywords,
    Center,
    DateCreated,
    MediaType,
    Query,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SearchQueries {
    Table,
    Id,
    Query,
    SearchCount,
    LastSearched,
}
