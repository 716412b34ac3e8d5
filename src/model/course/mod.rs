mod course_core;
mod feedback;
mod registry;

pub use course_core::{Course, FeedbackWindow};
pub use feedback::{Feedback, Rating};
pub use registry::FeedbackRegistry;

/// Course IDs are dense, zero-based integers.
pub type CourseId = usize;
