use serde::{Deserialize, Serialize};

/// A new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSpec {
    pub course_code: String,
    pub session: String,
    pub year: u32,
}

/// The caller's feedback on a course.
///
/// The rating is taken as a plain integer so that out-of-range values reach
/// the ledger and are rejected there as `InvalidRating`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSpec {
    pub content: String,
    pub rating: i64,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CourseSpec {
        pub fn example() -> Self {
            Self {
                course_code: "CSE101".to_string(),
                session: "Fall".to_string(),
                year: 2023,
            }
        }
    }

    impl FeedbackSpec {
        pub fn example() -> Self {
            Self {
                content: "Great course".to_string(),
                rating: 5,
            }
        }

        pub fn example_invalid_rating() -> Self {
            Self {
                content: "Off the scale".to_string(),
                rating: 6,
            }
        }
    }
}
