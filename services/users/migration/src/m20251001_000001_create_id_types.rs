use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(IdTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IdTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(IdTypes::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IdTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum IdTypes {
    Table,
    Id,
    Name,
}
