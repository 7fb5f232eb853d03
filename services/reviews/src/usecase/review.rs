use chrono::Utc;
use uuid::Uuid;

use nomnom_domain::pagination::PageRequest;
use nomnom_domain::review::{
    MAX_REVIEW_CHARS, ReviewTarget, average_rating, is_valid_rating,
};

use crate::domain::repository::ReviewRepository;
use crate::domain::types::{Review, TargetReviews};
use crate::error::ReviewsServiceError;

// ── AddReview ────────────────────────────────────────────────────────────────

pub struct AddReviewInput {
    pub customer_id: Uuid,
    pub target_id: Uuid,
    pub target_type: ReviewTarget,
    pub rating: i16,
    pub review: Option<String>,
}

pub struct AddReviewUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> AddReviewUseCase<R> {
    pub async fn execute(&self, input: AddReviewInput) -> Result<Review, ReviewsServiceError> {
        if !is_valid_rating(input.rating) {
            return Err(ReviewsServiceError::InvalidRequest(
                "rating must be between 1 and 5".to_owned(),
            ));
        }
        let text = input
            .review
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty());
        if text
            .as_deref()
            .is_some_and(|r| r.chars().count() > MAX_REVIEW_CHARS)
        {
            return Err(ReviewsServiceError::InvalidRequest(format!(
                "review must be at most {MAX_REVIEW_CHARS} characters"
            )));
        }

        let review = Review {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            target_id: input.target_id,
            target_type: input.target_type,
            rating: input.rating,
            review: text,
            created_at: Utc::now(),
        };
        self.repo.create(&review).await?;
        tracing::info!(
            review_id = %review.id,
            target_id = %review.target_id,
            target_type = %review.target_type,
            rating = review.rating,
            "review added"
        );
        Ok(review)
    }
}

// ── GetReviewsByTarget ───────────────────────────────────────────────────────

pub struct GetReviewsByTargetUseCase<R: ReviewRepository> {
    pub repo: R,
}

impl<R: ReviewRepository> GetReviewsByTargetUseCase<R> {
    pub async fn execute(
        &self,
        target_id: Uuid,
        target_type: ReviewTarget,
        page: PageRequest,
    ) -> Result<TargetReviews, ReviewsServiceError> {
        let reviews = self
            .repo
            .list_by_target(target_id, target_type, page.clamped())
            .await?;
        let ratings = self.repo.ratings(target_id, target_type).await?;
        Ok(TargetReviews {
            reviews,
            count: ratings.len() as u64,
            average_rating: average_rating(&ratings),
        })
    }
}
