use sea_orm_migration::prelude::*;

mod m20260401_000001_create_deliveries;
mod m20260401_000002_create_driver_applications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_deliveries::Migration),
            Box::new(m20260401_000002_create_driver_applications::Migration),
        ]
    }
}
