use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `employers` table and its columns.
#[derive(DeriveIden)]
enum Employers {
    Table,
    Id,
    TgId,
    TgUsername,
    Clinic,
    City,
    Phone,
    About,
    Rating,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employers::TgId).big_integer().null())
                    .col(ColumnDef::new(Employers::TgUsername).string_len(64).null())
                    .col(ColumnDef::new(Employers::Clinic).string_len(160).not_null())
                    .col(ColumnDef::new(Employers::City).string_len(120).not_null())
                    .col(ColumnDef::new(Employers::Phone).string_len(40).not_null())
                    .col(ColumnDef::new(Employers::About).text().null())
                    .col(
                        ColumnDef::new(Employers::Rating)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Employers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employers::Table).to_owned())
            .await
    }
}
