use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Assistants {
    Table,
    TgId,
    TgUsername,
}

#[derive(DeriveIden)]
enum Employers {
    Table,
    TgId,
    TgUsername,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Unique index on tg_id: Telegram assigns one per caller, so two
        // rows with the same tg_id would be the same person twice. SQLite
        // permits any number of NULLs in a unique index, which is what we
        // want for profiles submitted without an id.
        manager
            .create_index(
                Index::create()
                    .name("idx_assistants_tg_id")
                    .table(Assistants::Table)
                    .col(Assistants::TgId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Usernames are user-changeable, so only a plain lookup index.
        manager
            .create_index(
                Index::create()
                    .name("idx_assistants_tg_username")
                    .table(Assistants::Table)
                    .col(Assistants::TgUsername)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employers_tg_id")
                    .table(Employers::Table)
                    .col(Employers::TgId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employers_tg_username")
                    .table(Employers::Table)
                    .col(Employers::TgUsername)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_assistants_tg_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_assistants_tg_username").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employers_tg_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employers_tg_username").to_owned())
            .await?;

        Ok(())
    }
}
