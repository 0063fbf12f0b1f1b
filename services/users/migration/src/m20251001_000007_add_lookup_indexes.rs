use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::IdType)
                    .col(Users::IdNumber)
                    .unique()
                    .name("idx_users_identification")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::MobileNumber)
                    .name("idx_users_mobile_number")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .name("idx_users_created_at")
                    .to_owned(),
            )
            .await?;
        // Expression indexes are not expressible through the index builder.
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_users_lower_email ON users (lower(email))",
        )
        .await?;
        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_verification_codes_lower_contact \
             ON verification_codes (lower(contact))",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS idx_verification_codes_lower_contact")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS idx_users_lower_email")
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_mobile_number").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_identification").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    IdType,
    IdNumber,
    MobileNumber,
    CreatedAt,
}
