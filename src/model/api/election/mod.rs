mod results;
mod spec;

pub use results::ElectionResults;
pub use spec::{BallotSpec, CandidateSpec, ElectionSpec, VoterRegistration};
