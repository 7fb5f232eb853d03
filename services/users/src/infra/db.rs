use anyhow::Context as _;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    sea_query::OnConflict,
};
use uuid::Uuid;

use nomnom_domain::profile::ProfileFields;
use nomnom_users_schema::profiles;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::UsersServiceError;

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, UsersServiceError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        model.map(profile_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, UsersServiceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find profile by email")?;
        model.map(profile_from_model).transpose()
    }

    async fn save(&self, profile: &Profile) -> Result<(), UsersServiceError> {
        let fields = &profile.fields;
        let am = profiles::ActiveModel {
            id: Set(profile.id),
            email: Set(profile.email.clone()),
            user_type: Set(profile.user_type.as_str().to_owned()),
            first_name: Set(fields.first_name.clone()),
            last_name: Set(fields.last_name.clone()),
            contact_number: Set(fields.contact_number.clone()),
            address: Set(fields.address.clone()),
            profile_image: Set(fields.profile_image.clone()),
            restaurant_name: Set(fields.restaurant_name.clone()),
            restaurant_license_number: Set(fields.restaurant_license_number.clone()),
            restaurant_type_id: Set(fields.restaurant_type_id),
            cuisine_type_ids: Set(serde_json::json!(fields.cuisine_type_ids)),
            vehicle_number: Set(fields.vehicle_number.clone()),
            vehicle_type_id: Set(fields.vehicle_type_id),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        };

        let result = profiles::Entity::insert(am)
            .on_conflict(
                OnConflict::column(profiles::Column::Id)
                    .update_columns([
                        profiles::Column::Email,
                        profiles::Column::UserType,
                        profiles::Column::FirstName,
                        profiles::Column::LastName,
                        profiles::Column::ContactNumber,
                        profiles::Column::Address,
                        profiles::Column::ProfileImage,
                        profiles::Column::RestaurantName,
                        profiles::Column::RestaurantLicenseNumber,
                        profiles::Column::RestaurantTypeId,
                        profiles::Column::CuisineTypeIds,
                        profiles::Column::VehicleNumber,
                        profiles::Column::VehicleTypeId,
                        profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(UsersServiceError::EmailAlreadyInUse),
            Err(e) => Err(anyhow::Error::new(e).context("save profile").into()),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, UsersServiceError> {
    let user_type = model
        .user_type
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user_type on profile {}: {e}", model.id))?;
    let cuisine_type_ids: Vec<i64> = serde_json::from_value(model.cuisine_type_ids)
        .with_context(|| format!("corrupt cuisine_type_ids on profile {}", model.id))?;
    Ok(Profile {
        id: model.id,
        email: model.email,
        user_type,
        fields: ProfileFields {
            first_name: model.first_name,
            last_name: model.last_name,
            contact_number: model.contact_number,
            address: model.address,
            profile_image: model.profile_image,
            restaurant_name: model.restaurant_name,
            restaurant_license_number: model.restaurant_license_number,
            restaurant_type_id: model.restaurant_type_id,
            cuisine_type_ids,
            vehicle_number: model.vehicle_number,
            vehicle_type_id: model.vehicle_type_id,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
