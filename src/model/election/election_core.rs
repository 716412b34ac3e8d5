use serde::{Deserialize, Serialize};

use super::{CandidateId, ElectionId};

/// Top-level election data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    /// Election unique ID.
    pub id: ElectionId,
    /// Election title.
    pub title: String,
    /// Whether votes are currently accepted. Toggled freely by the administrator.
    pub is_active: bool,
}

impl Election {
    /// Create a new election. Elections start active.
    pub(super) fn new(id: ElectionId, title: String) -> Self {
        Self {
            id,
            title,
            is_active: true,
        }
    }
}

/// A single candidate standing in an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate ID, unique within its election.
    pub id: CandidateId,
    /// Candidate name or headline.
    pub header: String,
    /// Campaign slogan.
    pub slogan: String,
    /// Number of votes received so far.
    pub vote_count: u64,
}

impl Candidate {
    pub(super) fn new(id: CandidateId, header: String, slogan: String) -> Self {
        Self {
            id,
            header,
            slogan,
            vote_count: 0,
        }
    }

    pub(super) fn record_vote(&mut self) {
        self.vote_count += 1;
    }
}
