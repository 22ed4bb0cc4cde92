use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::StageId).uuid().not_null())
                    .col(ColumnDef::new(Games::SectionId).uuid())
                    .col(ColumnDef::new(Games::Label).string().not_null())
                    .col(ColumnDef::new(Games::Image).string())
                    .col(ColumnDef::new(Games::NumOrder).integer().not_null())
                    .col(ColumnDef::new(Games::Locale).string().not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string()
                            .not_null()
                            .default("NEW"),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Games::Table, Games::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Games::Table, Games::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The advancer's next-game lookup: WHERE locale = ? AND num_order = ?
        manager
            .create_index(
                Index::create()
                    .table(Games::Table)
                    .col(Games::Locale)
                    .col(Games::NumOrder)
                    .unique()
                    .name("uq_games_locale_num_order")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Games::Table)
                    .col(Games::StageId)
                    .name("idx_games_stage_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    StageId,
    SectionId,
    Label,
    Image,
    NumOrder,
    Locale,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stages {
    Table,
    Id,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
}
