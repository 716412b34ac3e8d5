use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::identity::Identity;
use crate::model::{
    course::CourseId,
    election::{CandidateId, ElectionId},
};

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// A business rejection. The operation that produced it had no effect on
/// the ledger, and the ledger remains valid and queryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Caller {0} is not the administrator")]
    Unauthorized(Identity),
    #[error("Not found: {0}")]
    NotFound(Missing),
    #[error("Already registered for election {0}")]
    AlreadyRegistered(ElectionId),
    #[error("Not registered for election {0}")]
    NotRegistered(ElectionId),
    #[error("Not verified for election {0}")]
    NotVerified(ElectionId),
    #[error("Already voted in election {0}")]
    AlreadyVoted(ElectionId),
    #[error("Election {0} is not active")]
    ElectionInactive(ElectionId),
    #[error("Course {0} is already closed for feedback")]
    AlreadyClosed(CourseId),
    #[error("Course {0} is closed for feedback")]
    CourseClosed(CourseId),
    #[error("Rating {0} is outside 1..=5")]
    InvalidRating(i64),
    #[error("Feedback already submitted for course {0}")]
    DuplicateFeedback(CourseId),
    #[error("Feedback index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

impl LedgerError {
    /// The stable identifier of this rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            Self::NotRegistered(_) => ErrorKind::NotRegistered,
            Self::NotVerified(_) => ErrorKind::NotVerified,
            Self::AlreadyVoted(_) => ErrorKind::AlreadyVoted,
            Self::ElectionInactive(_) => ErrorKind::ElectionInactive,
            Self::AlreadyClosed(_) => ErrorKind::AlreadyClosed,
            Self::CourseClosed(_) => ErrorKind::CourseClosed,
            Self::InvalidRating(_) => ErrorKind::InvalidRating,
            Self::DuplicateFeedback(_) => ErrorKind::DuplicateFeedback,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }
}

/// Stable rejection identifiers, serialized by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    AlreadyRegistered,
    NotRegistered,
    NotVerified,
    AlreadyVoted,
    ElectionInactive,
    AlreadyClosed,
    CourseClosed,
    InvalidRating,
    DuplicateFeedback,
    IndexOutOfRange,
}

/// The reference that failed to resolve in a `NotFound` rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Election(ElectionId),
    Candidate {
        election: ElectionId,
        candidate: CandidateId,
    },
    Voter {
        election: ElectionId,
        voter: Identity,
    },
    Course(CourseId),
}

impl Display for Missing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Election(id) => write!(f, "election {id}"),
            Self::Candidate {
                election,
                candidate,
            } => write!(f, "candidate {candidate} in election {election}"),
            Self::Voter { election, voter } => write!(f, "voter {voter} in election {election}"),
            Self::Course(id) => write!(f, "course {id}"),
        }
    }
}
