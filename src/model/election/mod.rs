mod election_core;
mod registry;
mod results;
mod verification;
mod voter;

pub use election_core::{Candidate, Election};
pub use registry::ElectionRegistry;
pub use results::winners;
pub use verification::TrustedDomain;
pub use voter::Voter;

/// Election IDs are dense, zero-based integers.
pub type ElectionId = usize;
/// Candidate IDs are dense, zero-based integers scoped to their election.
pub type CandidateId = usize;
