use serde::{Deserialize, Serialize};

use crate::model::election::CandidateId;

/// A new election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSpec {
    pub title: String,
}

/// A new candidate for an existing election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSpec {
    /// Display name.
    pub header: String,
    pub slogan: String,
}

/// The caller's own registration details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub name: String,
    /// Used for auto-verification against the trusted domain.
    pub email: String,
}

/// The caller's choice of candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallotSpec {
    pub candidate: CandidateId,
}
