use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::common::{Identity, LedgerError};

use super::CourseId;

/// A feedback rating, guaranteed to lie in `1..=5`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (Self::MIN..=Self::MAX).contains(rating))
            .map(Self)
            .ok_or(LedgerError::InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single, immutable piece of feedback on a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub course_id: CourseId,
    pub submitter: Identity,
    pub content: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn ratings_one_to_five_accepted() {
        for value in 1..=5 {
            assert_eq!(Rating::try_from(value).map(Rating::get), Ok(value as u8));
        }
    }

    #[test]
    fn ratings_outside_range_rejected() {
        for value in [0, 6, -1, 256, i64::MIN, i64::MAX] {
            assert_eq!(Rating::try_from(value), Err(LedgerError::InvalidRating(value)));
        }
    }

    #[test]
    fn rating_serializes_as_integer() {
        let rating = Rating::try_from(4).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap(), rating);
        assert!(serde_json::from_str::<Rating>("6").is_err());
    }
}
