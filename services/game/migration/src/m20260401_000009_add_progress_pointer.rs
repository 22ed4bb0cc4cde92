use sea_orm_migration::prelude::*;

/// Adds `users.current_entry_id` after both tables exist — the pointer and
/// `palmares.user_id` reference each other's tables, so the column cannot be
/// part of the users create.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column(ColumnDef::new(Users::CurrentEntryId).uuid())
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_users_current_entry_id")
                    .from(Users::Table, Users::CurrentEntryId)
                    .to(Palmares::Table, Palmares::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_users_current_entry_id")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Users::CurrentEntryId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    CurrentEntryId,
}

#[derive(Iden)]
enum Palmares {
    Table,
    Id,
}
