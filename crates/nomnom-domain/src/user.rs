//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role a user plays on the platform.
///
/// Wire format: upper-case string (`"CUSTOMER"`, `"RESTAURANT"`, `"DRIVER"`, `"PENDING"`).
/// `Pending` is the placeholder for accounts that have not chosen a role yet
/// (fresh Google sign-ins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    Restaurant,
    Driver,
    Pending,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Restaurant => "RESTAURANT",
            Self::Driver => "DRIVER",
            Self::Pending => "PENDING",
        }
    }

    /// `true` once the user has picked a real role.
    pub fn is_assigned(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for UserType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "RESTAURANT" => Ok(Self::Restaurant),
            "DRIVER" => Ok(Self::Driver),
            "PENDING" => Ok(Self::Pending),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// How an account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Google => "google",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "google" => Ok(Self::Google),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// Canonical form used for every email lookup and insert.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
