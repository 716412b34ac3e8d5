use serde::{Deserialize, Serialize};

use crate::model::common::Identity;

/// A voter's registration within a single election, keyed by their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// The identity that registered.
    pub identity: Identity,
    /// Name given at registration.
    pub name: String,
    /// Email given at registration.
    pub email: String,
    is_registered: bool,
    is_verified: bool,
    has_voted: bool,
}

impl Voter {
    /// Create a freshly registered voter.
    pub(super) fn register(identity: Identity, name: String, email: String, verified: bool) -> Self {
        Self {
            identity,
            name,
            email,
            is_registered: true,
            is_verified: verified,
            has_voted: false,
        }
    }

    /// Always true for a stored record; never cleared.
    pub fn is_registered(&self) -> bool {
        self.is_registered
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Terminal once set.
    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    pub(super) fn verify(&mut self) {
        self.is_verified = true;
    }

    pub(super) fn record_vote(&mut self) {
        self.has_voted = true;
    }
}
