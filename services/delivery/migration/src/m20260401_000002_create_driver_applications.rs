use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DriverApplications::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DriverApplications::VehicleNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverApplications::VehicleTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverApplications::LicenseNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DriverApplications::Phone).string_len(32))
                    .col(ColumnDef::new(DriverApplications::Email).string())
                    .col(
                        ColumnDef::new(DriverApplications::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(DriverApplications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(DriverApplications::DecidedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(DriverApplications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DriverApplications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DriverApplications {
    Table,
    UserId,
    VehicleNumber,
    VehicleTypeId,
    LicenseNumber,
    Phone,
    Email,
    Status,
    CreatedAt,
    DecidedAt,
    UpdatedAt,
}
