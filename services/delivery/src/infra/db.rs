use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use nomnom_delivery_schema::{deliveries, driver_applications};
use nomnom_domain::delivery::{DeliveryStatus, DriverApplicationStatus};
use nomnom_domain::pagination::PageRequest;

use crate::domain::repository::{DeliveryRepository, DriverApplicationRepository};
use crate::domain::types::{Delivery, DeliveryFilter, DriverApplication};
use crate::error::DeliveryServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Delivery repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDeliveryRepository {
    pub db: DatabaseConnection,
}

impl DeliveryRepository for DbDeliveryRepository {
    async fn create(&self, delivery: &Delivery) -> Result<(), DeliveryServiceError> {
        let result = deliveries::ActiveModel {
            id: Set(delivery.id),
            order_id: Set(delivery.order_id.clone()),
            customer_id: Set(delivery.customer_id),
            restaurant_id: Set(delivery.restaurant_id),
            driver_id: Set(delivery.driver_id),
            customer_phone: Set(delivery.customer_phone.clone()),
            customer_email: Set(delivery.customer_email.clone()),
            pickup_address: Set(delivery.pickup_address.clone()),
            dropoff_address: Set(delivery.dropoff_address.clone()),
            status: Set(delivery.status.as_str().to_owned()),
            created_at: Set(delivery.created_at),
            accepted_at: Set(delivery.accepted_at),
            picked_up_at: Set(delivery.picked_up_at),
            delivered_at: Set(delivery.delivered_at),
            cancelled_at: Set(delivery.cancelled_at),
            updated_at: Set(delivery.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DeliveryServiceError::DeliveryAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create delivery").into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Delivery>, DeliveryServiceError> {
        let model = deliveries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find delivery by id")?;
        model.map(delivery_from_model).transpose()
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<Delivery>, DeliveryServiceError> {
        let model = deliveries::Entity::find()
            .filter(deliveries::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .context("find delivery by order id")?;
        model.map(delivery_from_model).transpose()
    }

    async fn list(
        &self,
        filter: &DeliveryFilter,
        page: PageRequest,
    ) -> Result<Vec<Delivery>, DeliveryServiceError> {
        let page = page.clamped();
        let mut query = deliveries::Entity::find();
        if let Some(driver_id) = filter.driver_id {
            query = query.filter(deliveries::Column::DriverId.eq(driver_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(deliveries::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(deliveries::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list deliveries")?;
        models.into_iter().map(delivery_from_model).collect()
    }

    async fn compare_and_set_status(
        &self,
        updated: &Delivery,
        expected: DeliveryStatus,
    ) -> Result<bool, DeliveryServiceError> {
        let result = deliveries::Entity::update_many()
            .col_expr(
                deliveries::Column::Status,
                Expr::value(updated.status.as_str()),
            )
            .col_expr(deliveries::Column::DriverId, Expr::value(updated.driver_id))
            .col_expr(
                deliveries::Column::AcceptedAt,
                Expr::value(updated.accepted_at),
            )
            .col_expr(
                deliveries::Column::PickedUpAt,
                Expr::value(updated.picked_up_at),
            )
            .col_expr(
                deliveries::Column::DeliveredAt,
                Expr::value(updated.delivered_at),
            )
            .col_expr(
                deliveries::Column::CancelledAt,
                Expr::value(updated.cancelled_at),
            )
            .col_expr(deliveries::Column::UpdatedAt, Expr::value(updated.updated_at))
            .filter(deliveries::Column::Id.eq(updated.id))
            .filter(deliveries::Column::Status.eq(expected.as_str()))
            .exec(&self.db)
            .await
            .context("compare-and-set delivery status")?;
        Ok(result.rows_affected == 1)
    }
}

fn delivery_from_model(model: deliveries::Model) -> Result<Delivery, DeliveryServiceError> {
    let status = model
        .status
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt status on delivery {}: {e}", model.id))?;
    Ok(Delivery {
        id: model.id,
        order_id: model.order_id,
        customer_id: model.customer_id,
        restaurant_id: model.restaurant_id,
        driver_id: model.driver_id,
        customer_phone: model.customer_phone,
        customer_email: model.customer_email,
        pickup_address: model.pickup_address,
        dropoff_address: model.dropoff_address,
        status,
        created_at: model.created_at,
        accepted_at: model.accepted_at,
        picked_up_at: model.picked_up_at,
        delivered_at: model.delivered_at,
        cancelled_at: model.cancelled_at,
        updated_at: model.updated_at,
    })
}

// ── Driver application repository ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDriverApplicationRepository {
    pub db: DatabaseConnection,
}

impl DriverApplicationRepository for DbDriverApplicationRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<DriverApplication>, DeliveryServiceError> {
        let model = driver_applications::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find driver application")?;
        model.map(application_from_model).transpose()
    }

    async fn save(&self, application: &DriverApplication) -> Result<(), DeliveryServiceError> {
        let am = driver_applications::ActiveModel {
            user_id: Set(application.user_id),
            vehicle_number: Set(application.vehicle_number.clone()),
            vehicle_type_id: Set(application.vehicle_type_id),
            license_number: Set(application.license_number.clone()),
            phone: Set(application.phone.clone()),
            email: Set(application.email.clone()),
            status: Set(application.status.as_str().to_owned()),
            created_at: Set(application.created_at),
            decided_at: Set(application.decided_at),
            updated_at: Set(application.updated_at),
        };
        driver_applications::Entity::insert(am)
            .on_conflict(
                OnConflict::column(driver_applications::Column::UserId)
                    .update_columns([
                        driver_applications::Column::VehicleNumber,
                        driver_applications::Column::VehicleTypeId,
                        driver_applications::Column::LicenseNumber,
                        driver_applications::Column::Phone,
                        driver_applications::Column::Email,
                        driver_applications::Column::Status,
                        driver_applications::Column::CreatedAt,
                        driver_applications::Column::DecidedAt,
                        driver_applications::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("save driver application")?;
        Ok(())
    }

    async fn decide(
        &self,
        user_id: Uuid,
        decision: DriverApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, DeliveryServiceError> {
        let result = driver_applications::Entity::update_many()
            .col_expr(
                driver_applications::Column::Status,
                Expr::value(decision.as_str()),
            )
            .col_expr(driver_applications::Column::DecidedAt, Expr::value(at))
            .col_expr(driver_applications::Column::UpdatedAt, Expr::value(at))
            .filter(driver_applications::Column::UserId.eq(user_id))
            .filter(
                driver_applications::Column::Status.eq(DriverApplicationStatus::Pending.as_str()),
            )
            .exec(&self.db)
            .await
            .context("decide driver application")?;
        Ok(result.rows_affected == 1)
    }
}

fn application_from_model(
    model: driver_applications::Model,
) -> Result<DriverApplication, DeliveryServiceError> {
    let status = model
        .status
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt status on driver application {}: {e}", model.user_id))?;
    Ok(DriverApplication {
        user_id: model.user_id,
        vehicle_number: model.vehicle_number,
        vehicle_type_id: model.vehicle_type_id,
        license_number: model.license_number,
        phone: model.phone,
        email: model.email,
        status,
        created_at: model.created_at,
        decided_at: model.decided_at,
        updated_at: model.updated_at,
    })
}
