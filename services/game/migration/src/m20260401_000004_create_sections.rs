use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sections::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sections::Title).string().not_null())
                    .col(ColumnDef::new(Sections::Label).string().not_null())
                    .col(ColumnDef::new(Sections::NumOrder).integer().not_null())
                    .col(ColumnDef::new(Sections::Locale).string().not_null())
                    .col(
                        ColumnDef::new(Sections::Status)
                            .string()
                            .not_null()
                            .default("NEW"),
                    )
                    .col(
                        ColumnDef::new(Sections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sections::UpdatedAt)
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
                    .table(Sections::Table)
                    .col(Sections::Locale)
                    .col(Sections::NumOrder)
                    .unique()
                    .name("uq_sections_locale_num_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
    Title,
    Label,
    NumOrder,
    Locale,
    Status,
    CreatedAt,
    UpdatedAt,
}
