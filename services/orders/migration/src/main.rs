use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(nomnom_orders_migration::Migrator).await;
}
