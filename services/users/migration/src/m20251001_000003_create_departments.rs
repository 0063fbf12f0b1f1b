use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::CountryId).uuid().not_null())
                    .col(ColumnDef::new(Departments::Name).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Departments::Table, Departments::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Departments::Table)
                    .col(Departments::CountryId)
                    .name("idx_departments_country_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    CountryId,
    Name,
}

#[derive(Iden)]
enum Countries {
    Table,
    Id,
}
