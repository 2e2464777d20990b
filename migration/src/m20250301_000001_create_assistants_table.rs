use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `assistants` table and its columns.
#[derive(DeriveIden)]
enum Assistants {
    Table,
    Id,
    TgId,
    TgUsername,
    Name,
    City,
    Phone,
    Exp,
    Rate,
    About,
    AvailabilityDates,
    Rating,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assistants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assistants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assistants::TgId).big_integer().null())
                    .col(ColumnDef::new(Assistants::TgUsername).string_len(64).null())
                    .col(ColumnDef::new(Assistants::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Assistants::City).string_len(120).not_null())
                    .col(ColumnDef::new(Assistants::Phone).string_len(40).not_null())
                    .col(
                        ColumnDef::new(Assistants::Exp)
                            .string_len(20)
                            .not_null()
                            .default("0"),
                    )
                    .col(ColumnDef::new(Assistants::Rate).string_len(20).null())
                    .col(ColumnDef::new(Assistants::About).text().null())
                    // JSON array of "YYYY-MM-DD" strings, stored as TEXT.
                    .col(ColumnDef::new(Assistants::AvailabilityDates).text().null())
                    .col(
                        ColumnDef::new(Assistants::Rating)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Assistants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assistants::Table).to_owned())
            .await
    }
}
