use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nomnom_auth_types::identity::IdentityHeaders;
use nomnom_domain::pagination::PageRequest;
use nomnom_domain::review::ReviewTarget;
use nomnom_domain::user::UserType;

use crate::domain::types::{Review, TargetReviews};
use crate::error::ReviewsServiceError;
use crate::state::AppState;
use crate::usecase::review::{AddReviewInput, AddReviewUseCase, GetReviewsByTargetUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub customer_id: String,
    pub target_id: String,
    pub target_type: ReviewTarget,
    pub rating: i16,
    pub review: Option<String>,
    #[serde(serialize_with = "nomnom_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id.to_string(),
            customer_id: r.customer_id.to_string(),
            target_id: r.target_id.to_string(),
            target_type: r.target_type,
            rating: r.rating,
            review: r.review,
            created_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
    pub count: u64,
    pub average_rating: Option<f64>,
}

impl From<TargetReviews> for TargetReviewsResponse {
    fn from(t: TargetReviews) -> Self {
        Self {
            reviews: t.reviews.into_iter().map(Into::into).collect(),
            count: t.count,
            average_rating: t.average_rating,
        }
    }
}

// ── POST /api/reviews ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub target_id: Uuid,
    pub target_type: ReviewTarget,
    pub rating: i16,
    pub review: Option<String>,
}

pub async fn add_review(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AddReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ReviewsServiceError> {
    if identity.user_type != UserType::Customer {
        return Err(ReviewsServiceError::Forbidden);
    }
    let usecase = AddReviewUseCase {
        repo: state.review_repo(),
    };
    let review = usecase
        .execute(AddReviewInput {
            customer_id: identity.user_id,
            target_id: body.target_id,
            target_type: body.target_type,
            rating: body.rating,
            review: body.review,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /api/reviews ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReviewsQuery {
    #[serde(rename = "targetId")]
    pub target_id: Uuid,
    #[serde(rename = "targetType")]
    pub target_type: ReviewTarget,
    pub page: Option<u32>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
}

impl ReviewsQuery {
    fn page_request(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest {
            per_page: self.per_page.unwrap_or(default.per_page),
            page: self.page.unwrap_or(default.page),
        }
    }
}

pub async fn get_reviews_by_target(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<TargetReviewsResponse>, ReviewsServiceError> {
    let usecase = GetReviewsByTargetUseCase {
        repo: state.review_repo(),
    };
    let reviews = usecase
        .execute(query.target_id, query.target_type, query.page_request())
        .await?;
    Ok(Json(reviews.into()))
}
