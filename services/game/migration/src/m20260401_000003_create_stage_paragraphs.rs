use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StageParagraphs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StageParagraphs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StageParagraphs::StageId).uuid().not_null())
                    .col(ColumnDef::new(StageParagraphs::Body).text().not_null())
                    .col(
                        ColumnDef::new(StageParagraphs::Position)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StageParagraphs::Table, StageParagraphs::StageId)
                            .to(Stages::Table, Stages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(StageParagraphs::Table)
                    .col(StageParagraphs::StageId)
                    .name("idx_stage_paragraphs_stage_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StageParagraphs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StageParagraphs {
    Table,
    Id,
    StageId,
    Body,
    Position,
}

#[derive(Iden)]
enum Stages {
    Table,
    Id,
}
