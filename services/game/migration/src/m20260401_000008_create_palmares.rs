use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Palmares::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Palmares::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Palmares::UserId).uuid().not_null())
                    .col(ColumnDef::new(Palmares::StageId).uuid().not_null())
                    .col(ColumnDef::new(Palmares::SectionId).uuid())
                    .col(ColumnDef::new(Palmares::GameId).uuid().not_null())
                    .col(ColumnDef::new(Palmares::StageLabel).string().not_null())
                    .col(ColumnDef::new(Palmares::SectionLabel).string())
                    .col(ColumnDef::new(Palmares::GameLabel).string().not_null())
                    .col(ColumnDef::new(Palmares::StageOrder).integer().not_null())
                    .col(ColumnDef::new(Palmares::SectionOrder).integer())
                    .col(ColumnDef::new(Palmares::GameOrder).integer().not_null())
                    .col(ColumnDef::new(Palmares::Position).integer().not_null())
                    .col(ColumnDef::new(Palmares::Locale).string().not_null())
                    .col(
                        ColumnDef::new(Palmares::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Palmares::IsFinished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Palmares::StatusStage).string().not_null())
                    .col(ColumnDef::new(Palmares::StatusSection).string().not_null())
                    .col(ColumnDef::new(Palmares::StatusGame).string().not_null())
                    .col(
                        ColumnDef::new(Palmares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Palmares::Table, Palmares::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Palmares::Table, Palmares::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Palmares::Table, Palmares::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Palmares::Table, Palmares::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Palmares::Table)
                    .col(Palmares::UserId)
                    .col((Palmares::CreatedAt, IndexOrder::Desc))
                    .name("idx_palmares_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Palmares::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Palmares {
    Table,
    Id,
    UserId,
    StageId,
    SectionId,
    GameId,
    StageLabel,
    SectionLabel,
    GameLabel,
    StageOrder,
    SectionOrder,
    GameOrder,
    Position,
    Locale,
    Score,
    IsFinished,
    StatusStage,
    StatusSection,
    StatusGame,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
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

#[derive(Iden)]
enum Games {
    Table,
    Id,
}
