use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(ResetCodes::Table)
                    .add_column(
                        ColumnDef::new(ResetCodes::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(ResetCodes::Table)
                    .drop_column(ResetCodes::Attempts)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum ResetCodes {
    Table,
    Attempts,
}
