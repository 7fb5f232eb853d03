#![allow(async_fn_in_trait)]

use uuid::Uuid;

use nomnom_domain::pagination::PageRequest;
use nomnom_domain::review::ReviewTarget;

use crate::domain::types::Review;
use crate::error::ReviewsServiceError;

pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), ReviewsServiceError>;

    /// Newest first.
    async fn list_by_target(
        &self,
        target_id: Uuid,
        target_type: ReviewTarget,
        page: PageRequest,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Every rating the target has received, for the aggregate.
    async fn ratings(
        &self,
        target_id: Uuid,
        target_type: ReviewTarget,
    ) -> Result<Vec<i16>, ReviewsServiceError>;
}
