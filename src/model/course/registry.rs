use std::collections::HashSet;

use log::info;

use crate::model::{
    authority::AuthorityGate,
    common::{Identity, LedgerError, LedgerResult, Missing},
};

use super::{Course, CourseId, Feedback, Rating};

/// A course together with the feedback submitted for it.
#[derive(Debug, Clone)]
struct CourseEntry {
    course: Course,
    /// Feedback in submission order. Append-only.
    feedback: Vec<Feedback>,
    /// Identities that have already submitted feedback for this course.
    submitters: HashSet<Identity>,
}

/// Owns every course and feedback record.
#[derive(Debug, Clone)]
pub struct FeedbackRegistry {
    authority: AuthorityGate,
    courses: Vec<CourseEntry>,
}

impl FeedbackRegistry {
    pub fn new(authority: AuthorityGate) -> Self {
        Self {
            authority,
            courses: Vec::new(),
        }
    }

    fn entry(&self, course_id: CourseId) -> LedgerResult<&CourseEntry> {
        self.courses
            .get(course_id)
            .ok_or(LedgerError::NotFound(Missing::Course(course_id)))
    }

    fn entry_mut(&mut self, course_id: CourseId) -> LedgerResult<&mut CourseEntry> {
        self.courses
            .get_mut(course_id)
            .ok_or(LedgerError::NotFound(Missing::Course(course_id)))
    }

    /// Add a new course, open for feedback.
    pub fn add_course(
        &mut self,
        caller: &Identity,
        course_code: &str,
        session: &str,
        year: u32,
    ) -> LedgerResult<CourseId> {
        self.authority.ensure_administrator(caller)?;

        let id = self.courses.len();
        self.courses.push(CourseEntry {
            course: Course::new(id, course_code.to_string(), session.to_string(), year),
            feedback: Vec::new(),
            submitters: HashSet::new(),
        });
        info!("Added course {id}: {course_code} {session} {year}");
        Ok(id)
    }

    /// Permanently stop a course accepting feedback.
    pub fn close_course_for_feedback(
        &mut self,
        caller: &Identity,
        course_id: CourseId,
    ) -> LedgerResult<()> {
        self.authority.ensure_administrator(caller)?;
        let entry = self.entry_mut(course_id)?;

        if !entry.course.close() {
            return Err(LedgerError::AlreadyClosed(course_id));
        }
        info!("Closed course {course_id} for feedback");
        Ok(())
    }

    /// Submit `caller`'s one piece of feedback for a course.
    /// Returns the position of the new entry in submission order.
    pub fn submit_feedback(
        &mut self,
        caller: &Identity,
        course_id: CourseId,
        content: &str,
        rating: i64,
    ) -> LedgerResult<usize> {
        let entry = self.entry_mut(course_id)?;
        if !entry.course.is_open_for_feedback() {
            return Err(LedgerError::CourseClosed(course_id));
        }
        let rating = Rating::try_from(rating)?;
        if entry.submitters.contains(caller) {
            return Err(LedgerError::DuplicateFeedback(course_id));
        }

        let index = entry.feedback.len();
        entry.submitters.insert(caller.clone());
        entry.feedback.push(Feedback {
            course_id,
            submitter: caller.clone(),
            content: content.to_string(),
            rating,
        });
        info!("Recorded feedback {index} for course {course_id} from {caller}");
        Ok(index)
    }

    /// A single feedback entry. Administrator only.
    pub fn feedback(
        &self,
        caller: &Identity,
        course_id: CourseId,
        index: usize,
    ) -> LedgerResult<&Feedback> {
        let all = self.all_feedback(caller, course_id)?;
        all.get(index).ok_or(LedgerError::IndexOutOfRange {
            index,
            len: all.len(),
        })
    }

    /// All feedback for a course, in submission order. Administrator only.
    pub fn all_feedback(&self, caller: &Identity, course_id: CourseId) -> LedgerResult<&[Feedback]> {
        self.authority.ensure_administrator(caller)?;
        self.entry(course_id).map(|entry| entry.feedback.as_slice())
    }

    /// All courses, in creation order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().map(|entry| &entry.course)
    }

    pub fn course(&self, course_id: CourseId) -> LedgerResult<&Course> {
        self.entry(course_id).map(|entry| &entry.course)
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl FeedbackRegistry {
        pub fn example() -> Self {
            Self::new(AuthorityGate::new(Identity::example_admin()))
        }

        /// One open course, `CSE101 Fall 2023`.
        pub fn example_with_course() -> Self {
            let mut registry = Self::example();
            registry
                .add_course(&Identity::example_admin(), "CSE101", "Fall", 2023)
                .unwrap();
            registry
        }
    }
}
