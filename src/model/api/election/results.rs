use serde::{Deserialize, Serialize};

use crate::model::election::{winners, Candidate, CandidateId, Election, ElectionId};

/// The current tallies of an election, with the co-winners they imply.
///
/// Results are readable at any time. `is_final` only reports whether the
/// election is currently closed to votes; it may be reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub election: ElectionId,
    pub candidates: Vec<Candidate>,
    /// Every candidate holding the highest count, in candidate order.
    pub winners: Vec<CandidateId>,
    pub total_votes: u64,
    pub is_final: bool,
}

impl ElectionResults {
    pub fn tally(election: &Election, candidates: &[Candidate]) -> Self {
        Self {
            election: election.id,
            candidates: candidates.to_vec(),
            winners: winners(candidates).into_iter().map(|c| c.id).collect(),
            total_votes: candidates.iter().map(|c| c.vote_count).sum(),
            is_final: !election.is_active,
        }
    }
}
