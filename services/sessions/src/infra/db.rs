use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use uuid::Uuid;

use nomnom_sessions_schema::sessions;

use crate::domain::repository::SessionRepository;
use crate::domain::types::Session;
use crate::error::SessionServiceError;

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), SessionServiceError> {
        sessions::ActiveModel {
            id: Set(session.id),
            user_id: Set(session.user_id),
            user_type: Set(session.user_type.as_str().to_owned()),
            ip_address: Set(session.ip_address.clone()),
            device: Set(session.device.clone()),
            created_at: Set(session.created_at),
            expires_at: Set(session.expires_at),
            revoked_at: Set(None),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, SessionServiceError> {
        let model = sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find session by id")?;
        model.map(session_from_model).transpose()
    }

    async fn revoke(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, SessionServiceError> {
        let exists = sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find session to revoke")?
            .is_some();
        if !exists {
            return Ok(false);
        }
        sessions::Entity::update_many()
            .col_expr(sessions::Column::RevokedAt, Expr::value(at))
            .filter(sessions::Column::Id.eq(id))
            .filter(sessions::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await
            .context("revoke session")?;
        Ok(true)
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<u64, SessionServiceError> {
        let result = sessions::Entity::update_many()
            .col_expr(sessions::Column::RevokedAt, Expr::value(at))
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(at))
            .exec(&self.db)
            .await
            .context("revoke user sessions")?;
        Ok(result.rows_affected)
    }

    async fn list_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Session>, SessionServiceError> {
        let models = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(now))
            .order_by_desc(sessions::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list active sessions")?;
        models.into_iter().map(session_from_model).collect()
    }
}

fn session_from_model(model: sessions::Model) -> Result<Session, SessionServiceError> {
    let user_type = model
        .user_type
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user_type on session {}: {e}", model.id))?;
    Ok(Session {
        id: model.id,
        user_id: model.user_id,
        user_type,
        ip_address: model.ip_address,
        device: model.device,
        created_at: model.created_at,
        expires_at: model.expires_at,
        revoked_at: model.revoked_at,
    })
}
