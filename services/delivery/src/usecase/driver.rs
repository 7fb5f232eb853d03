use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use nomnom_domain::delivery::DriverApplicationStatus;

use crate::domain::repository::{DriverApplicationRepository, NotificationPort};
use crate::domain::types::{DriverApplication, events};
use crate::error::DeliveryServiceError;

// ── ApplyDriver ──────────────────────────────────────────────────────────────

pub struct ApplyDriverInput {
    pub user_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type_id: i64,
    pub license_number: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub struct ApplyDriverUseCase<A: DriverApplicationRepository> {
    pub applications: A,
}

impl<A: DriverApplicationRepository> ApplyDriverUseCase<A> {
    /// Rejected applicants may apply again; any other application on file blocks a new one.
    pub async fn execute(
        &self,
        input: ApplyDriverInput,
    ) -> Result<DriverApplication, DeliveryServiceError> {
        let vehicle_number = input.vehicle_number.trim();
        let license_number = input.license_number.trim();
        if vehicle_number.is_empty() || license_number.is_empty() {
            return Err(DeliveryServiceError::InvalidRequest(
                "vehicleNumber and licenseNumber are required".to_owned(),
            ));
        }

        if let Some(existing) = self.applications.find_by_user(input.user_id).await? {
            if existing.status != DriverApplicationStatus::Rejected {
                return Err(DeliveryServiceError::ApplicationAlreadyExists);
            }
        }

        let now = Utc::now();
        let application = DriverApplication {
            user_id: input.user_id,
            vehicle_number: vehicle_number.to_owned(),
            vehicle_type_id: input.vehicle_type_id,
            license_number: license_number.to_owned(),
            phone: input.phone.filter(|p| !p.trim().is_empty()),
            email: input.email.filter(|e| !e.trim().is_empty()),
            status: DriverApplicationStatus::Pending,
            created_at: now,
            decided_at: None,
            updated_at: now,
        };
        self.applications.save(&application).await?;
        tracing::info!(user_id = %application.user_id, "driver application submitted");
        Ok(application)
    }
}

// ── DecideDriverApplication ──────────────────────────────────────────────────

pub struct DecideDriverApplicationUseCase<A, N>
where
    A: DriverApplicationRepository,
    N: NotificationPort,
{
    pub applications: A,
    pub notifier: N,
}

impl<A, N> DecideDriverApplicationUseCase<A, N>
where
    A: DriverApplicationRepository,
    N: NotificationPort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        decision: DriverApplicationStatus,
    ) -> Result<DriverApplication, DeliveryServiceError> {
        if decision == DriverApplicationStatus::Pending {
            return Err(DeliveryServiceError::InvalidRequest(
                "status must be APPROVED or REJECTED".to_owned(),
            ));
        }

        let mut application = self
            .applications
            .find_by_user(user_id)
            .await?
            .ok_or(DeliveryServiceError::ApplicationNotFound)?;
        if !application.status.can_decide(decision) {
            return Err(DeliveryServiceError::ApplicationAlreadyDecided);
        }

        let now = Utc::now();
        if !self.applications.decide(user_id, decision, now).await? {
            return Err(DeliveryServiceError::ApplicationAlreadyDecided);
        }
        application.status = decision;
        application.decided_at = Some(now);
        application.updated_at = now;
        tracing::info!(user_id = %user_id, status = decision.as_str(), "driver application decided");

        self.notify(&application).await;
        Ok(application)
    }

    async fn notify(&self, application: &DriverApplication) {
        let status = application.status.as_str();
        if let Err(e) = self
            .notifier
            .push(
                application.user_id,
                events::DRIVER_APPLICATION,
                json!({ "status": status }),
            )
            .await
        {
            tracing::warn!(user_id = %application.user_id, error = %e, "applicant push failed");
        }

        if let Some(email) = application.email.as_deref() {
            let text = match application.status {
                DriverApplicationStatus::Approved => {
                    "Your application to drive with NomNom has been approved. You can start accepting deliveries now."
                }
                _ => "Your application to drive with NomNom was not approved this time. You are welcome to apply again.",
            };
            if let Err(e) = self
                .notifier
                .email(email, "Your NomNom driver application", text)
                .await
            {
                tracing::warn!(user_id = %application.user_id, error = %e, "applicant email failed");
            }
        }
    }
}

// ── GetDriverApplication ─────────────────────────────────────────────────────

pub struct GetDriverApplicationUseCase<A: DriverApplicationRepository> {
    pub applications: A,
}

impl<A: DriverApplicationRepository> GetDriverApplicationUseCase<A> {
    pub async fn execute(&self, user_id: Uuid) -> Result<DriverApplication, DeliveryServiceError> {
        self.applications
            .find_by_user(user_id)
            .await?
            .ok_or(DeliveryServiceError::ApplicationNotFound)
    }
}
