use std::collections::HashMap;

use log::info;

use crate::model::{
    authority::AuthorityGate,
    common::{Identity, LedgerError, LedgerResult, Missing},
};

use super::{Candidate, CandidateId, Election, ElectionId, TrustedDomain, Voter};

/// An election together with everything it owns.
#[derive(Debug, Clone)]
struct ElectionEntry {
    election: Election,
    candidates: Vec<Candidate>,
    /// Voters in registration order.
    voters: Vec<Voter>,
    /// Position of each identity's record in `voters`.
    voter_index: HashMap<Identity, usize>,
}

impl ElectionEntry {
    fn new(election: Election) -> Self {
        Self {
            election,
            candidates: Vec::new(),
            voters: Vec::new(),
            voter_index: HashMap::new(),
        }
    }

    fn voter_position(&self, identity: &Identity) -> Option<usize> {
        self.voter_index.get(identity).copied()
    }
}

/// Owns every election, candidate and voter record.
///
/// Each mutating operation checks, in order, authority, existence, state flags
/// and uniqueness, and only writes once every check has passed. A rejected
/// operation therefore leaves the registry exactly as it was.
#[derive(Debug, Clone)]
pub struct ElectionRegistry {
    authority: AuthorityGate,
    trusted_domain: TrustedDomain,
    elections: Vec<ElectionEntry>,
}

impl ElectionRegistry {
    pub fn new(authority: AuthorityGate, trusted_domain: TrustedDomain) -> Self {
        Self {
            authority,
            trusted_domain,
            elections: Vec::new(),
        }
    }

    fn entry(&self, election_id: ElectionId) -> LedgerResult<&ElectionEntry> {
        self.elections
            .get(election_id)
            .ok_or(LedgerError::NotFound(Missing::Election(election_id)))
    }

    fn entry_mut(&mut self, election_id: ElectionId) -> LedgerResult<&mut ElectionEntry> {
        self.elections
            .get_mut(election_id)
            .ok_or(LedgerError::NotFound(Missing::Election(election_id)))
    }

    /// Create a new, active election with no candidates or voters.
    pub fn create_election(&mut self, caller: &Identity, title: &str) -> LedgerResult<ElectionId> {
        self.authority.ensure_administrator(caller)?;

        let id = self.elections.len();
        self.elections
            .push(ElectionEntry::new(Election::new(id, title.to_string())));
        info!("Created election {id} \"{title}\"");
        Ok(id)
    }

    /// Add a candidate to an existing election.
    pub fn add_candidate(
        &mut self,
        caller: &Identity,
        election_id: ElectionId,
        header: &str,
        slogan: &str,
    ) -> LedgerResult<CandidateId> {
        self.authority.ensure_administrator(caller)?;
        let entry = self.entry_mut(election_id)?;

        let id = entry.candidates.len();
        entry
            .candidates
            .push(Candidate::new(id, header.to_string(), slogan.to_string()));
        info!("Added candidate {id} \"{header}\" to election {election_id}");
        Ok(id)
    }

    /// Open an election for voting. A no-op if it is already active.
    pub fn activate(&mut self, caller: &Identity, election_id: ElectionId) -> LedgerResult<()> {
        self.set_active(caller, election_id, true)
    }

    /// Stop an election accepting votes. A no-op if it is already inactive.
    pub fn deactivate(&mut self, caller: &Identity, election_id: ElectionId) -> LedgerResult<()> {
        self.set_active(caller, election_id, false)
    }

    fn set_active(
        &mut self,
        caller: &Identity,
        election_id: ElectionId,
        is_active: bool,
    ) -> LedgerResult<()> {
        self.authority.ensure_administrator(caller)?;
        let entry = self.entry_mut(election_id)?;

        entry.election.is_active = is_active;
        info!("Election {election_id} active: {is_active}");
        Ok(())
    }

    /// Register `caller` as a voter in an election.
    ///
    /// Voters whose email belongs to the trusted domain are verified immediately;
    /// everyone else waits for the administrator.
    pub fn register_voter(
        &mut self,
        caller: &Identity,
        election_id: ElectionId,
        name: &str,
        email: &str,
    ) -> LedgerResult<Voter> {
        let verified = self.trusted_domain.verifies(email);
        let entry = self.entry_mut(election_id)?;
        if entry.voter_position(caller).is_some() {
            return Err(LedgerError::AlreadyRegistered(election_id));
        }

        let voter = Voter::register(caller.clone(), name.to_string(), email.to_string(), verified);
        entry.voter_index.insert(caller.clone(), entry.voters.len());
        entry.voters.push(voter.clone());
        info!("Registered voter {caller} in election {election_id} (verified: {verified})");
        Ok(voter)
    }

    /// Mark a registered voter as verified. Idempotent.
    pub fn verify_voter(
        &mut self,
        caller: &Identity,
        election_id: ElectionId,
        voter: &Identity,
    ) -> LedgerResult<()> {
        self.authority.ensure_administrator(caller)?;
        let entry = self.entry_mut(election_id)?;
        let position = entry.voter_position(voter).ok_or_else(|| {
            LedgerError::NotFound(Missing::Voter {
                election: election_id,
                voter: voter.clone(),
            })
        })?;

        entry.voters[position].verify();
        info!("Verified voter {voter} in election {election_id}");
        Ok(())
    }

    /// Cast `caller`'s single vote for a candidate.
    pub fn vote(
        &mut self,
        caller: &Identity,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> LedgerResult<()> {
        let entry = self.entry_mut(election_id)?;
        if candidate_id >= entry.candidates.len() {
            return Err(LedgerError::NotFound(Missing::Candidate {
                election: election_id,
                candidate: candidate_id,
            }));
        }
        if !entry.election.is_active {
            return Err(LedgerError::ElectionInactive(election_id));
        }
        let position = entry
            .voter_position(caller)
            .filter(|&position| entry.voters[position].is_registered())
            .ok_or(LedgerError::NotRegistered(election_id))?;
        let voter = &entry.voters[position];
        if !voter.is_verified() {
            return Err(LedgerError::NotVerified(election_id));
        }
        if voter.has_voted() {
            return Err(LedgerError::AlreadyVoted(election_id));
        }

        entry.candidates[candidate_id].record_vote();
        entry.voters[position].record_vote();
        info!("Recorded vote by {caller} in election {election_id}");
        Ok(())
    }

    /// All elections, in creation order.
    pub fn elections(&self) -> impl Iterator<Item = &Election> {
        self.elections.iter().map(|entry| &entry.election)
    }

    /// Only the elections currently accepting votes, in creation order.
    pub fn active_elections(&self) -> impl Iterator<Item = &Election> {
        self.elections().filter(|election| election.is_active)
    }

    pub fn election(&self, election_id: ElectionId) -> LedgerResult<&Election> {
        self.entry(election_id).map(|entry| &entry.election)
    }

    pub fn candidates(&self, election_id: ElectionId) -> LedgerResult<&[Candidate]> {
        self.entry(election_id).map(|entry| entry.candidates.as_slice())
    }

    pub fn total_candidates(&self, election_id: ElectionId) -> LedgerResult<usize> {
        self.candidates(election_id).map(<[Candidate]>::len)
    }

    pub fn candidate(
        &self,
        election_id: ElectionId,
        candidate_id: CandidateId,
    ) -> LedgerResult<&Candidate> {
        self.candidates(election_id)?
            .get(candidate_id)
            .ok_or(LedgerError::NotFound(Missing::Candidate {
                election: election_id,
                candidate: candidate_id,
            }))
    }

    /// All voters of an election, in registration order.
    pub fn voters(&self, election_id: ElectionId) -> LedgerResult<&[Voter]> {
        self.entry(election_id).map(|entry| entry.voters.as_slice())
    }

    pub fn voter(&self, election_id: ElectionId, identity: &Identity) -> LedgerResult<&Voter> {
        let entry = self.entry(election_id)?;
        entry
            .voter_position(identity)
            .map(|position| &entry.voters[position])
            .ok_or_else(|| {
                LedgerError::NotFound(Missing::Voter {
                    election: election_id,
                    voter: identity.clone(),
                })
            })
    }

    /// Has `identity` voted in this election? False if they never registered.
    pub fn has_voted(&self, election_id: ElectionId, identity: &Identity) -> LedgerResult<bool> {
        let entry = self.entry(election_id)?;
        Ok(entry
            .voter_position(identity)
            .map_or(false, |position| entry.voters[position].has_voted()))
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ElectionRegistry {
        pub fn example() -> Self {
            Self::new(
                AuthorityGate::new(Identity::example_admin()),
                TrustedDomain::example(),
            )
        }

        /// One active election with one candidate and one verified voter.
        pub fn example_with_voter() -> Self {
            let admin = Identity::example_admin();
            let mut registry = Self::example();
            registry.create_election(&admin, "Election 1").unwrap();
            registry
                .add_candidate(&admin, 0, "Candidate 1", "Slogan 1")
                .unwrap();
            registry
                .register_voter(&Identity::example_voter(), 0, "Alice", "1234567890")
                .unwrap();
            registry
                .verify_voter(&admin, 0, &Identity::example_voter())
                .unwrap();
            registry
        }
    }
}
