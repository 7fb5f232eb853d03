use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use nomnom_domain::pagination::PageRequest;
use nomnom_domain::review::ReviewTarget;
use nomnom_reviews_schema::reviews;

use crate::domain::repository::ReviewRepository;
use crate::domain::types::Review;
use crate::error::ReviewsServiceError;

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), ReviewsServiceError> {
        reviews::ActiveModel {
            id: Set(review.id),
            customer_id: Set(review.customer_id),
            target_id: Set(review.target_id),
            target_type: Set(review.target_type.as_str().to_owned()),
            rating: Set(review.rating),
            review: Set(review.review.clone()),
            created_at: Set(review.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert review")?;
        Ok(())
    }

    async fn list_by_target(
        &self,
        target_id: Uuid,
        target_type: ReviewTarget,
        page: PageRequest,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let page = page.clamped();
        let models = reviews::Entity::find()
            .filter(reviews::Column::TargetId.eq(target_id))
            .filter(reviews::Column::TargetType.eq(target_type.as_str()))
            .order_by_desc(reviews::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list reviews by target")?;
        models.into_iter().map(review_from_model).collect()
    }

    async fn ratings(
        &self,
        target_id: Uuid,
        target_type: ReviewTarget,
    ) -> Result<Vec<i16>, ReviewsServiceError> {
        let models = reviews::Entity::find()
            .filter(reviews::Column::TargetId.eq(target_id))
            .filter(reviews::Column::TargetType.eq(target_type.as_str()))
            .all(&self.db)
            .await
            .context("load ratings")?;
        Ok(models.into_iter().map(|m| m.rating).collect())
    }
}

fn review_from_model(model: reviews::Model) -> Result<Review, ReviewsServiceError> {
    let target_type = model
        .target_type
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt target type on review {}: {e}", model.id))?;
    Ok(Review {
        id: model.id,
        customer_id: model.customer_id,
        target_id: model.target_id,
        target_type,
        rating: model.rating,
        review: model.review,
        created_at: model.created_at,
    })
}
