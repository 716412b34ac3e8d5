use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::model::{
    authority::AuthorityGate,
    common::{Identity, LedgerResult},
    course::FeedbackRegistry,
    election::{ElectionRegistry, TrustedDomain},
};

/// Both registries, as guarded together by a [`Ledger`].
#[derive(Debug, Clone)]
pub struct Registries {
    pub elections: ElectionRegistry,
    pub courses: FeedbackRegistry,
}

/// The shared ledger store. Cheap to clone; all clones see the same state.
///
/// Every operation runs under a single reader-writer lock: reads may overlap each
/// other, writes are exclusive. Each registry operation validates completely before
/// it mutates, so the effect of any set of concurrent operations is that of some
/// sequential order of them.
#[derive(Debug, Clone)]
pub struct Ledger {
    authority: AuthorityGate,
    store: Arc<RwLock<Registries>>,
}

impl Ledger {
    pub fn new(authority: AuthorityGate, trusted_domain: TrustedDomain) -> Self {
        let registries = Registries {
            elections: ElectionRegistry::new(authority.clone(), trusted_domain),
            courses: FeedbackRegistry::new(authority.clone()),
        };
        Self {
            authority,
            store: Arc::new(RwLock::new(registries)),
        }
    }

    /// The sole administrator identity.
    pub fn administrator(&self) -> &Identity {
        self.authority.administrator()
    }

    /// Run a read-only query against the store.
    pub fn read<T>(&self, query: impl FnOnce(&Registries) -> T) -> T {
        query(&*self.lock_read())
    }

    /// Run a mutating operation against the store, exclusively.
    ///
    /// Atomicity is per registry operation: a closure that performs several
    /// operations keeps the effects of those that succeeded before a rejection.
    pub fn write<T>(
        &self,
        operation: impl FnOnce(&mut Registries) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let result = operation(&mut *self.lock_write());
        if let Err(ref err) = result {
            debug!("Rejected ledger operation: {err}");
        }
        result
    }

    // Poisoning is ignored: mutation only starts once validation is complete, so a
    // panic while holding the lock cannot leave a half-applied operation behind.
    fn lock_read(&self) -> RwLockReadGuard<'_, Registries> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(&self) -> RwLockWriteGuard<'_, Registries> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}


#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::model::common::LedgerError;

    #[test]
    fn clones_share_state() {
        let ledger = Ledger::example();
        let other = ledger.clone();
        let admin = Identity::example_admin();

        ledger
            .write(|r| r.elections.create_election(&admin, "Election 1"))
            .unwrap();
        other
            .write(|r| r.courses.add_course(&admin, "CSE101", "Fall", 2023))
            .unwrap();

        assert_eq!(other.read(|r| r.elections.elections().count()), 1);
        assert_eq!(ledger.read(|r| r.courses.courses().count()), 1);
        assert_eq!(ledger.administrator(), &admin);
    }

    #[test]
    fn rejected_write_leaves_store_unchanged() {
        let ledger = Ledger::example();
        let before = ledger.read(|r| format!("{r:?}"));
        let result = ledger.write(|r| r.elections.create_election(&Identity::example_voter(), "X"));
        assert_eq!(
            result,
            Err(LedgerError::Unauthorized(Identity::example_voter()))
        );
        assert_eq!(before, ledger.read(|r| format!("{r:?}")));
    }

    #[test]
    fn concurrent_votes_are_serialized() {
        const VOTERS: usize = 64;

        let ledger = Ledger::example();
        let admin = Identity::example_admin();
        ledger
            .write(|r| {
                r.elections.create_election(&admin, "Election 1")?;
                r.elections.add_candidate(&admin, 0, "Candidate 1", "Slogan 1")?;
                r.elections.add_candidate(&admin, 0, "Candidate 2", "Slogan 2")
            })
            .unwrap();

        let voters = (0..VOTERS)
            .map(|i| Identity::new(format!("0xvoter{i}")))
            .collect::<Vec<_>>();

        // Every voter registers with a trusted address, then tries to vote twice.
        let outcomes = thread::scope(|scope| {
            let handles = voters
                .iter()
                .enumerate()
                .map(|(i, voter)| {
                    let ledger = ledger.clone();
                    scope.spawn(move || {
                        let email = format!("voter{i}@asu.edu");
                        ledger
                            .write(|r| r.elections.register_voter(voter, 0, "Voter", &email))
                            .unwrap();
                        let first = ledger.write(|r| r.elections.vote(voter, 0, i % 2));
                        let second = ledger.write(|r| r.elections.vote(voter, 0, i % 2));
                        (first, second)
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        for (first, second) in outcomes {
            assert_eq!(first, Ok(()));
            assert_eq!(second, Err(LedgerError::AlreadyVoted(0)));
        }
        let counts = ledger.read(|r| {
            r.elections
                .candidates(0)
                .unwrap()
                .iter()
                .map(|c| c.vote_count)
                .collect::<Vec<_>>()
        });
        assert_eq!(counts, vec![VOTERS as u64 / 2, VOTERS as u64 / 2]);
        assert!(ledger.read(|r| r.elections.voters(0).unwrap().iter().all(|v| v.has_voted())));
    }

    #[test]
    fn concurrent_feedback_keeps_one_per_submitter() {
        let ledger = Ledger::example();
        let admin = Identity::example_admin();
        ledger
            .write(|r| r.courses.add_course(&admin, "CSE101", "Fall", 2023))
            .unwrap();

        let submitter = Identity::example_voter();
        let accepted = thread::scope(|scope| {
            let handles = (0..8)
                .map(|i| {
                    let ledger = ledger.clone();
                    let submitter = submitter.clone();
                    scope.spawn(move || {
                        ledger
                            .write(|r| {
                                r.courses
                                    .submit_feedback(&submitter, 0, &format!("Take {i}"), 4)
                            })
                            .is_ok()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|&ok| ok)
                .count()
        });

        assert_eq!(accepted, 1);
        assert_eq!(
            ledger.read(|r| r.courses.all_feedback(&admin, 0).unwrap().len()),
            1
        );
    }
}
