use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use uuid::Uuid;

use nomnom_auth_schema::{reset_codes, users};
use nomnom_domain::user::{AuthProvider, UserType};

use crate::domain::repository::{ResetCodeRepository, UserRepository};
use crate::domain::types::{AuthUser, MAX_OTP_ATTEMPTS, ResetCode};
use crate::error::AuthServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .context("find user by google id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            user_type: Set(user.user_type.as_str().to_owned()),
            google_id: Set(user.google_id.clone()),
            is_google_user: Set(user.is_google_user),
            auth_provider: Set(user.auth_provider.as_str().to_owned()),
            profile_completed: Set(user.profile_completed),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AuthServiceError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        // Only fill an empty slot; a record already linked to another Google id keeps it.
        users::Entity::update_many()
            .col_expr(users::Column::GoogleId, Expr::value(google_id))
            .col_expr(users::Column::IsGoogleUser, Expr::value(true))
            .col_expr(
                users::Column::AuthProvider,
                Expr::value(AuthProvider::Google.as_str()),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(at))
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::GoogleId.is_null())
            .exec(&self.db)
            .await
            .context("link google id")?;
        Ok(())
    }

    async fn complete_profile(
        &self,
        id: Uuid,
        user_type: UserType,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            user_type: Set(user_type.as_str().to_owned()),
            profile_completed: Set(true),
            updated_at: Set(at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("complete profile")?;
        Ok(())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(password_hash.to_owned())),
            updated_at: Set(at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set password hash")?;
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn user_from_model(model: users::Model) -> Result<AuthUser, AuthServiceError> {
    let user_type = model
        .user_type
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user_type on user {}: {e}", model.id))?;
    let auth_provider = model
        .auth_provider
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt auth_provider on user {}: {e}", model.id))?;
    Ok(AuthUser {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        user_type,
        google_id: model.google_id,
        is_google_user: model.is_google_user,
        auth_provider,
        profile_completed: model.profile_completed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Reset code repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResetCodeRepository {
    pub db: DatabaseConnection,
}

impl ResetCodeRepository for DbResetCodeRepository {
    async fn count_active(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        let now = Utc::now();
        let count = reset_codes::Entity::find()
            .filter(reset_codes::Column::UserId.eq(user_id))
            .filter(reset_codes::Column::UsedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await
            .context("count active reset codes")?;
        Ok(count)
    }

    async fn create(&self, code: &ResetCode) -> Result<(), AuthServiceError> {
        reset_codes::ActiveModel {
            id: Set(code.id),
            user_id: Set(code.user_id),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            used_at: Set(None),
            attempts: Set(code.attempts),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create reset code")?;
        Ok(())
    }

    async fn find_valid(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError> {
        let now = Utc::now();
        let model = reset_codes::Entity::find()
            .filter(reset_codes::Column::UserId.eq(user_id))
            .filter(reset_codes::Column::Code.eq(code))
            .filter(reset_codes::Column::UsedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .filter(reset_codes::Column::Attempts.lt(MAX_OTP_ATTEMPTS))
            .one(&self.db)
            .await
            .context("find valid reset code")?;
        Ok(model.map(reset_code_from_model))
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        let result = reset_codes::Entity::update_many()
            .col_expr(reset_codes::Column::UsedAt, Expr::value(Utc::now()))
            .filter(reset_codes::Column::Id.eq(id))
            .filter(reset_codes::Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .context("mark reset code used")?;
        Ok(result.rows_affected == 1)
    }

    async fn record_miss(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        reset_codes::Entity::update_many()
            .col_expr(
                reset_codes::Column::Attempts,
                Expr::col(reset_codes::Column::Attempts).add(1),
            )
            .filter(reset_codes::Column::UserId.eq(user_id))
            .filter(reset_codes::Column::UsedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(Utc::now()))
            .exec(&self.db)
            .await
            .context("record reset code miss")?;
        Ok(())
    }
}

fn reset_code_from_model(model: reset_codes::Model) -> ResetCode {
    ResetCode {
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        expires_at: model.expires_at,
        used_at: model.used_at,
        attempts: model.attempts,
        created_at: model.created_at,
    }
}
