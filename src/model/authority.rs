use log::debug;

use crate::model::common::{Identity, LedgerError, LedgerResult};

/// Holds the single administrator identity for the lifetime of the ledger.
///
/// Fixed at construction. Administrators cannot be transferred or added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityGate {
    administrator: Identity,
}

impl AuthorityGate {
    pub fn new(administrator: Identity) -> Self {
        Self { administrator }
    }

    pub fn administrator(&self) -> &Identity {
        &self.administrator
    }

    pub fn is_administrator(&self, identity: &Identity) -> bool {
        &self.administrator == identity
    }

    /// Reject with `Unauthorized` unless `caller` is the administrator.
    /// Privileged operations call this before anything else.
    pub fn ensure_administrator(&self, caller: &Identity) -> LedgerResult<()> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            debug!("Rejected privileged operation from {caller}");
            Err(LedgerError::Unauthorized(caller.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_administrator_passes() {
        let gate = AuthorityGate::new(Identity::example_admin());
        assert!(gate.is_administrator(&Identity::example_admin()));
        assert!(!gate.is_administrator(&Identity::example_voter()));

        assert_eq!(gate.ensure_administrator(&Identity::example_admin()), Ok(()));
        assert_eq!(
            gate.ensure_administrator(&Identity::example_voter()),
            Err(LedgerError::Unauthorized(Identity::example_voter()))
        );
    }

    #[test]
    fn identities_compare_exactly() {
        let gate = AuthorityGate::new(Identity::new("0xABC"));
        assert!(!gate.is_administrator(&Identity::new("0xabc")));
        assert!(!gate.is_administrator(&Identity::new("0xABC ")));
    }
}
