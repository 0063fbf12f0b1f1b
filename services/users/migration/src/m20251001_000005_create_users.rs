use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::IdType).uuid().not_null())
                    .col(ColumnDef::new(Users::IdNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Users::FirstName).string_len(40).not_null())
                    .col(ColumnDef::new(Users::SecondName).string_len(40).null())
                    .col(ColumnDef::new(Users::FirstSurname).string_len(40).not_null())
                    .col(ColumnDef::new(Users::SecondSurname).string_len(40).null())
                    .col(ColumnDef::new(Users::HomeCity).uuid().not_null())
                    .col(ColumnDef::new(Users::Email).string_len(250).null())
                    .col(ColumnDef::new(Users::MobileNumber).string_len(20).null())
                    .col(
                        ColumnDef::new(Users::EmailConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::MobileNumberConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::IdType)
                            .to(IdTypes::Table, IdTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::HomeCity)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    IdType,
    IdNumber,
    FirstName,
    SecondName,
    FirstSurname,
    SecondSurname,
    HomeCity,
    Email,
    MobileNumber,
    EmailConfirmed,
    MobileNumberConfirmed,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum IdTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
}
