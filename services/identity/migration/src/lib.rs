use sea_orm_migration::prelude::*;

mod m20260120_000001_create_users;
mod m20260120_000002_create_otp_codes;
mod m20260120_000003_add_otp_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260120_000001_create_users::Migration),
            Box::new(m20260120_000002_create_otp_codes::Migration),
            Box::new(m20260120_000003_add_otp_indexes::Migration),
        ]
    }
}
