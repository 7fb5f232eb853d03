use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use nomnom_domain::delivery::{DeliveryStatus, DriverApplicationStatus};
use nomnom_domain::pagination::PageRequest;

use crate::domain::repository::{DeliveryRepository, DriverApplicationRepository, NotificationPort};
use crate::domain::types::{Delivery, DeliveryFilter, DeliveryRef, events};
use crate::error::DeliveryServiceError;

async fn load<R: DeliveryRepository>(
    repo: &R,
    target: &DeliveryRef,
) -> Result<Delivery, DeliveryServiceError> {
    let found = match target {
        DeliveryRef::Id(id) => repo.find_by_id(*id).await?,
        DeliveryRef::Order(order_id) => repo.find_by_order_id(order_id).await?,
    };
    found.ok_or(DeliveryServiceError::DeliveryNotFound)
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── CreateDelivery ───────────────────────────────────────────────────────────

pub struct CreateDeliveryInput {
    pub order_id: String,
    pub customer_id: Uuid,
    pub restaurant_id: Option<Uuid>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
}

pub struct CreateDeliveryUseCase<R: DeliveryRepository, N: NotificationPort> {
    pub repo: R,
    pub notifier: N,
}

impl<R: DeliveryRepository, N: NotificationPort> CreateDeliveryUseCase<R, N> {
    pub async fn execute(
        &self,
        input: CreateDeliveryInput,
    ) -> Result<Delivery, DeliveryServiceError> {
        let order_id = input.order_id.trim();
        if order_id.is_empty() {
            return Err(DeliveryServiceError::InvalidRequest(
                "orderId is required".to_owned(),
            ));
        }

        let now = Utc::now();
        let delivery = Delivery {
            id: Uuid::now_v7(),
            order_id: order_id.to_owned(),
            customer_id: input.customer_id,
            restaurant_id: input.restaurant_id,
            driver_id: None,
            customer_phone: blank_to_none(input.customer_phone),
            customer_email: blank_to_none(input.customer_email),
            pickup_address: blank_to_none(input.pickup_address),
            dropoff_address: blank_to_none(input.dropoff_address),
            status: DeliveryStatus::Pending,
            created_at: now,
            accepted_at: None,
            picked_up_at: None,
            delivered_at: None,
            cancelled_at: None,
            updated_at: now,
        };
        self.repo.create(&delivery).await?;
        tracing::info!(delivery_id = %delivery.id, order_id = %delivery.order_id, "delivery created");

        let payload = json!({ "deliveryId": delivery.id, "orderId": delivery.order_id });
        if let Err(e) = self
            .notifier
            .push(delivery.customer_id, events::DELIVERY_CREATED, payload)
            .await
        {
            tracing::warn!(delivery_id = %delivery.id, error = %e, "customer push failed");
        }
        Ok(delivery)
    }
}

// ── UpdateDeliveryStatus ─────────────────────────────────────────────────────

pub struct UpdateDeliveryStatusUseCase<R, A, N>
where
    R: DeliveryRepository,
    A: DriverApplicationRepository,
    N: NotificationPort,
{
    pub deliveries: R,
    pub applications: A,
    pub notifier: N,
}

impl<R, A, N> UpdateDeliveryStatusUseCase<R, A, N>
where
    R: DeliveryRepository,
    A: DriverApplicationRepository,
    N: NotificationPort,
{
    /// Move a delivery to `next`. `driver_id` is required for ACCEPTED and ignored otherwise.
    ///
    /// Repeating the current status is a no-op, except that a second driver
    /// trying to accept gets `DeliveryAlreadyAssigned`.
    pub async fn execute(
        &self,
        target: DeliveryRef,
        next: DeliveryStatus,
        driver_id: Option<Uuid>,
    ) -> Result<Delivery, DeliveryServiceError> {
        let driver_id = match next {
            DeliveryStatus::Accepted => {
                Some(driver_id.ok_or(DeliveryServiceError::DriverRequired)?)
            }
            _ => None,
        };

        let current = load(&self.deliveries, &target).await?;
        if let Some(driver_id) = driver_id {
            self.ensure_approved(driver_id).await?;
        }

        if current.status == next {
            if next == DeliveryStatus::Accepted && current.driver_id != driver_id {
                return Err(DeliveryServiceError::DeliveryAlreadyAssigned);
            }
            return Ok(current);
        }

        current.status.transition(next)?;
        let updated = current.advanced(next, driver_id, Utc::now());

        if !self
            .deliveries
            .compare_and_set_status(&updated, current.status)
            .await?
        {
            tracing::info!(
                delivery_id = %current.id,
                from = %current.status,
                to = %next,
                "lost status race"
            );
            return Err(DeliveryServiceError::StatusConflict);
        }

        tracing::info!(
            delivery_id = %updated.id,
            from = %current.status,
            to = %next,
            "delivery status changed"
        );
        self.notify(&updated).await;
        Ok(updated)
    }

    async fn ensure_approved(&self, driver_id: Uuid) -> Result<(), DeliveryServiceError> {
        match self.applications.find_by_user(driver_id).await? {
            Some(app) if app.status == DriverApplicationStatus::Approved => Ok(()),
            _ => Err(DeliveryServiceError::DriverNotApproved),
        }
    }

    async fn notify(&self, delivery: &Delivery) {
        let payload = json!({
            "deliveryId": delivery.id,
            "orderId": delivery.order_id,
            "status": delivery.status,
            "driverId": delivery.driver_id,
        });

        if let Err(e) = self
            .notifier
            .push(delivery.customer_id, events::DELIVERY_STATUS, payload.clone())
            .await
        {
            tracing::warn!(delivery_id = %delivery.id, error = %e, "customer push failed");
        }

        if delivery.status == DeliveryStatus::Accepted {
            if let Some(driver_id) = delivery.driver_id {
                if let Err(e) = self
                    .notifier
                    .push(driver_id, events::DELIVERY_ASSIGNED, payload)
                    .await
                {
                    tracing::warn!(delivery_id = %delivery.id, error = %e, "driver push failed");
                }
            }
        }

        if let (Some(phone), Some(text)) = (
            delivery.customer_phone.as_deref(),
            sms_text(delivery.status, &delivery.order_id),
        ) {
            if let Err(e) = self.notifier.sms(phone, &text).await {
                tracing::warn!(delivery_id = %delivery.id, error = %e, "customer sms failed");
            }
        }
    }
}

fn sms_text(status: DeliveryStatus, order_id: &str) -> Option<String> {
    match status {
        DeliveryStatus::Accepted => Some(format!(
            "A driver has accepted your order {order_id} and is on the way to the restaurant."
        )),
        DeliveryStatus::Delivered => Some(format!(
            "Your order {order_id} has been delivered. Enjoy your meal!"
        )),
        _ => None,
    }
}

// ── GetDelivery ──────────────────────────────────────────────────────────────

pub struct GetDeliveryUseCase<R: DeliveryRepository> {
    pub repo: R,
}

impl<R: DeliveryRepository> GetDeliveryUseCase<R> {
    pub async fn execute(&self, target: DeliveryRef) -> Result<Delivery, DeliveryServiceError> {
        load(&self.repo, &target).await
    }
}

// ── ListDeliveries ───────────────────────────────────────────────────────────

pub struct ListDeliveriesUseCase<R: DeliveryRepository> {
    pub repo: R,
}

impl<R: DeliveryRepository> ListDeliveriesUseCase<R> {
    pub async fn execute(
        &self,
        filter: DeliveryFilter,
        page: PageRequest,
    ) -> Result<Vec<Delivery>, DeliveryServiceError> {
        self.repo.list(&filter, page.clamped()).await
    }
}
