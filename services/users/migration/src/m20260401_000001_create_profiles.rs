use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Profiles::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::UserType).string_len(16).not_null())
                    .col(ColumnDef::new(Profiles::FirstName).string())
                    .col(ColumnDef::new(Profiles::LastName).string())
                    .col(ColumnDef::new(Profiles::ContactNumber).string_len(32))
                    .col(ColumnDef::new(Profiles::Address).text())
                    .col(ColumnDef::new(Profiles::ProfileImage).text())
                    .col(ColumnDef::new(Profiles::RestaurantName).string())
                    .col(ColumnDef::new(Profiles::RestaurantLicenseNumber).string())
                    .col(ColumnDef::new(Profiles::RestaurantTypeId).big_integer())
                    .col(
                        ColumnDef::new(Profiles::CuisineTypeIds)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Profiles::VehicleNumber).string_len(32))
                    .col(ColumnDef::new(Profiles::VehicleTypeId).big_integer())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
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
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    Email,
    UserType,
    FirstName,
    LastName,
    ContactNumber,
    Address,
    ProfileImage,
    RestaurantName,
    RestaurantLicenseNumber,
    RestaurantTypeId,
    CuisineTypeIds,
    VehicleNumber,
    VehicleTypeId,
    CreatedAt,
    UpdatedAt,
}
