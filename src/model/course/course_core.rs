use serde::{Deserialize, Serialize};

use super::CourseId;

/// States in the Course feedback lifecycle.
///
/// There is no transition out of `Closed`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackWindow {
    /// Accepting feedback.
    Open,
    /// No longer accepting feedback. Terminal.
    Closed,
}

/// A course that can collect feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CourseRecord", from = "CourseRecord")]
pub struct Course {
    /// Course unique ID.
    pub id: CourseId,
    /// Catalogue code, e.g. `CSE101`.
    pub course_code: String,
    /// Teaching session, e.g. `Fall`.
    pub session: String,
    pub year: u32,
    feedback_window: FeedbackWindow,
}

impl Course {
    /// Create a new course, open for feedback.
    pub(super) fn new(id: CourseId, course_code: String, session: String, year: u32) -> Self {
        Self {
            id,
            course_code,
            session,
            year,
            feedback_window: FeedbackWindow::Open,
        }
    }

    pub fn feedback_window(&self) -> FeedbackWindow {
        self.feedback_window
    }

    pub fn is_open_for_feedback(&self) -> bool {
        self.feedback_window == FeedbackWindow::Open
    }

    /// Close the feedback window. Returns false, changing nothing, if it was
    /// already closed.
    pub(super) fn close(&mut self) -> bool {
        match self.feedback_window {
            FeedbackWindow::Open => {
                self.feedback_window = FeedbackWindow::Closed;
                true
            }
            FeedbackWindow::Closed => false,
        }
    }
}

/// Wire form of a [`Course`], with the open flag spelled out for clients.
/// The flag is derived from the window and ignored on input.
#[derive(Serialize, Deserialize)]
struct CourseRecord {
    id: CourseId,
    course_code: String,
    session: String,
    year: u32,
    feedback_window: FeedbackWindow,
    #[serde(default)]
    is_open_for_feedback: bool,
}

impl From<Course> for CourseRecord {
    fn from(course: Course) -> Self {
        Self {
            is_open_for_feedback: course.is_open_for_feedback(),
            id: course.id,
            course_code: course.course_code,
            session: course.session,
            year: course.year,
            feedback_window: course.feedback_window,
        }
    }
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            course_code: record.course_code,
            session: record.session,
            year: record.year,
            feedback_window: record.feedback_window,
        }
    }
}
