use sea_orm_migration::prelude::*;

mod m20251001_000001_create_id_types;
mod m20251001_000002_create_countries;
mod m20251001_000003_create_departments;
mod m20251001_000004_create_cities;
mod m20251001_000005_create_users;
mod m20251001_000006_create_verification_codes;
mod m20251001_000007_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_id_types::Migration),
            Box::new(m20251001_000002_create_countries::Migration),
            Box::new(m20251001_000003_create_departments::Migration),
            Box::new(m20251001_000004_create_cities::Migration),
            Box::new(m20251001_000005_create_users::Migration),
            Box::new(m20251001_000006_create_verification_codes::Migration),
            Box::new(m20251001_000007_add_lookup_indexes::Migration),
        ]
    }
}
