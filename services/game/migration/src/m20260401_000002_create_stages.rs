use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stages::Title).string().not_null())
                    .col(ColumnDef::new(Stages::Label).string().not_null())
                    .col(ColumnDef::new(Stages::Image).string().not_null())
                    .col(ColumnDef::new(Stages::NumOrder).integer().not_null())
                    .col(ColumnDef::new(Stages::Locale).string().not_null())
                    .col(
                        ColumnDef::new(Stages::Status)
                            .string()
                            .not_null()
                            .default("NEW"),
                    )
                    .col(
                        ColumnDef::new(Stages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Stages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Stages::Table)
                    .col(Stages::Locale)
                    .col(Stages::NumOrder)
                    .unique()
                    .name("uq_stages_locale_num_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Stages {
    Table,
    Id,
    Title,
    Label,
    Image,
    NumOrder,
    Locale,
    Status,
    CreatedAt,
    UpdatedAt,
}
