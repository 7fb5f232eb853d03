//! Customer reviews of restaurants and drivers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::user::UnknownVariant;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
pub const MAX_REVIEW_CHARS: usize = 1000;

/// What kind of account a review is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewTarget {
    Restaurant,
    Driver,
}

impl ReviewTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "RESTAURANT",
            Self::Driver => "DRIVER",
        }
    }
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewTarget {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESTAURANT" => Ok(Self::Restaurant),
            "DRIVER" => Ok(Self::Driver),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

pub fn is_valid_rating(rating: i16) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Mean rating rounded to one decimal, `None` when there are no ratings.
pub fn average_rating(ratings: &[i16]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
