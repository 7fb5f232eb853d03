use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deliveries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deliveries::OrderId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Deliveries::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Deliveries::RestaurantId).uuid())
                    .col(ColumnDef::new(Deliveries::DriverId).uuid())
                    .col(ColumnDef::new(Deliveries::CustomerPhone).string_len(32))
                    .col(ColumnDef::new(Deliveries::CustomerEmail).string())
                    .col(ColumnDef::new(Deliveries::PickupAddress).text())
                    .col(ColumnDef::new(Deliveries::DropoffAddress).text())
                    .col(
                        ColumnDef::new(Deliveries::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Deliveries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Deliveries::AcceptedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Deliveries::PickedUpAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Deliveries::DeliveredAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Deliveries::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Deliveries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Deliveries::Table)
                    .col(Deliveries::DriverId)
                    .col(Deliveries::CreatedAt)
                    .name("idx_deliveries_driver_id_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Deliveries::Table)
                    .col(Deliveries::Status)
                    .col(Deliveries::CreatedAt)
                    .name("idx_deliveries_status_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deliveries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Deliveries {
    Table,
    Id,
    OrderId,
    CustomerId,
    RestaurantId,
    DriverId,
    CustomerPhone,
    CustomerEmail,
    PickupAddress,
    DropoffAddress,
    Status,
    CreatedAt,
    AcceptedAt,
    PickedUpAt,
    DeliveredAt,
    CancelledAt,
    UpdatedAt,
}
