use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(nomnom_reviews_migration::Migrator).await;
}
