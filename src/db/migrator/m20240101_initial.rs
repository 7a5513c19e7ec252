use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Searches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Searches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Searches::City).string().not_null())
                    .col(ColumnDef::new(Searches::Latitude).double().null())
                    .col(ColumnDef::new(Searches::Longitude).double().null())
                    .col(ColumnDef::new(Searches::UserId).string().null())
                    .col(
                        ColumnDef::new(Searches::Timestamp)
                            .date_time()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .to_owned(),
            )
            .await?;

        // History lookups filter by user and sort by time
        manager
            .create_index(
                Index::create()
                    .name("idx_searches_user_id_timestamp")
                    .table(Searches::Table)
                    .col(Searches::UserId)
                    .col(Searches::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Cities::Latitude).double().null())
                    .col(ColumnDef::new(Cities::Longitude).double().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Searches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Searches {
    Table,
    Id,
    City,
    Latitude,
    Longitude,
    UserId,
    Timestamp,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
}
