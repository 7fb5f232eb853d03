use chrono::{DateTime, Utc};
use uuid::Uuid;

use nomnom_domain::review::ReviewTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub target_id: Uuid,
    pub target_type: ReviewTarget,
    pub rating: i16,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reviews of one target plus the aggregate over all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetReviews {
    pub reviews: Vec<Review>,
    pub count: u64,
    pub average_rating: Option<f64>,
}
