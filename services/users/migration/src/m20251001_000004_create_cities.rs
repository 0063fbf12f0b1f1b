use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cities::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Cities::Name).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cities::Table, Cities::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Cities::Table)
                    .col(Cities::DepartmentId)
                    .name("idx_cities_department_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    DepartmentId,
    Name,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
}
