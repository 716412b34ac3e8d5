use super::Candidate;

/// Determine the winner(s) from a set of candidate tallies.
///
/// Every candidate holding the maximum vote count is a co-winner. No candidates
/// means no winners. This is a read-side computation over whatever tallies it is
/// given; the registry itself never decides a winner.
pub fn winners(candidates: &[Candidate]) -> Vec<&Candidate> {
    let Some(max) = candidates.iter().map(|c| c.vote_count).max() else {
        return Vec::new();
    };
    candidates.iter().filter(|c| c.vote_count == max).collect()
}
