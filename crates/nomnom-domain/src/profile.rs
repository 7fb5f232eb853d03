//! Profile fields and the per-role completeness rule.

use serde::{Deserialize, Serialize};

use crate::user::UserType;

/// Role-specific profile data owned by the users service.
///
/// Every field is optional on the wire; which ones are required depends on the
/// user's role, see [`missing_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub profile_image: Option<String>,
    pub restaurant_name: Option<String>,
    pub restaurant_license_number: Option<String>,
    pub restaurant_type_id: Option<i64>,
    pub cuisine_type_ids: Vec<i64>,
    pub vehicle_number: Option<String>,
    pub vehicle_type_id: Option<i64>,
}

impl ProfileFields {
    /// Overlay every field that is set on `other` onto `self`.
    pub fn merge(&mut self, other: ProfileFields) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.first_name, other.first_name);
        take(&mut self.last_name, other.last_name);
        take(&mut self.contact_number, other.contact_number);
        take(&mut self.address, other.address);
        take(&mut self.profile_image, other.profile_image);
        take(&mut self.restaurant_name, other.restaurant_name);
        take(
            &mut self.restaurant_license_number,
            other.restaurant_license_number,
        );
        take(&mut self.restaurant_type_id, other.restaurant_type_id);
        take(&mut self.vehicle_number, other.vehicle_number);
        take(&mut self.vehicle_type_id, other.vehicle_type_id);
        if !other.cuisine_type_ids.is_empty() {
            self.cuisine_type_ids = other.cuisine_type_ids;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub const MISSING_BASIC_INFO: &str = "basic profile information";
pub const MISSING_RESTAURANT_DETAILS: &str = "restaurant details";
pub const MISSING_VEHICLE_INFO: &str = "vehicle information";
pub const MISSING_USER_TYPE: &str = "user type";
/// Reported when the profile could not be read at all.
pub const MISSING_PROFILE_DATA: &str = "profile data";

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Field groups the profile still lacks for `user_type`. Empty means complete.
pub fn missing_fields(user_type: UserType, fields: &ProfileFields) -> Vec<&'static str> {
    let complete = match user_type {
        UserType::Customer => {
            present(&fields.first_name)
                && present(&fields.last_name)
                && present(&fields.contact_number)
        }
        UserType::Restaurant => {
            present(&fields.restaurant_name)
                && present(&fields.restaurant_license_number)
                && !fields.cuisine_type_ids.is_empty()
                && fields.restaurant_type_id.is_some()
        }
        UserType::Driver => present(&fields.vehicle_number) && fields.vehicle_type_id.is_some(),
        UserType::Pending => false,
    };
    if complete {
        return Vec::new();
    }
    vec![match user_type {
        UserType::Customer => MISSING_BASIC_INFO,
        UserType::Restaurant => MISSING_RESTAURANT_DETAILS,
        UserType::Driver => MISSING_VEHICLE_INFO,
        UserType::Pending => MISSING_USER_TYPE,
    }]
}

/// Split a display name into `(first, last)` at the first run of whitespace.
///
/// ```
/// use nomnom_domain::profile::split_display_name;
///
/// assert_eq!(
///     split_display_name("Ada  King Lovelace"),
///     (Some("Ada".to_owned()), Some("King Lovelace".to_owned()))
/// );
/// assert_eq!(split_display_name("Cher"), (Some("Cher".to_owned()), None));
/// assert_eq!(split_display_name("   "), (None, None));
/// ```
pub fn split_display_name(name: &str) -> (Option<String>, Option<String>) {
    let name = name.trim();
    if name.is_empty() {
        return (None, None);
    }
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => {
            let rest = rest.trim();
            let last = (!rest.is_empty()).then(|| rest.to_owned());
            (Some(first.to_owned()), last)
        }
        None => (Some(name.to_owned()), None),
    }
}
