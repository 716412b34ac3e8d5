use chrono::Duration;
use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

use crate::model::{
    authority::AuthorityGate, common::Identity, election::TrustedDomain, Ledger,
};

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Deserialize)]
pub struct Config {
    // non-secrets
    admin_identity: Identity,
    trusted_email_domain: String,
    auth_ttl: u32,
    // secrets
    jwt_secret: String,
    admin_password_hash: String,
}

impl Config {
    /// The sole identity allowed to perform administrative operations.
    pub fn admin_identity(&self) -> &Identity {
        &self.admin_identity
    }

    /// Voters registering with an email in this domain are verified immediately.
    pub fn trusted_domain(&self) -> TrustedDomain {
        TrustedDomain::new(self.trusted_email_domain.as_str())
    }

    /// Valid lifetime of auth token cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to sign JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Argon2-encoded hash of the administrator's session password.
    pub fn admin_password_hash(&self) -> &str {
        &self.admin_password_hash
    }

    /// A fresh, empty ledger administered by the configured identity.
    pub fn new_ledger(&self) -> Ledger {
        Ledger::new(
            AuthorityGate::new(self.admin_identity.clone()),
            self.trusted_domain(),
        )
    }
}

/// A fairing that loads the application config and puts it in managed state.
/// This could easily be achieved using `AdHoc::config`, but is written out
/// explicitly for symmetry with the ledger fairing and control over error
/// messages.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that creates the in-memory ledger from the managed [`Config`]
/// and places it into managed state. Must be attached after [`ConfigFairing`].
pub struct LedgerFairing;

#[rocket::async_trait]
impl Fairing for LedgerFairing {
    fn info(&self) -> Info {
        Info {
            name: "Ledger",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let Some(config) = rocket.state::<Config>() else {
            error!("Cannot create the ledger without application config");
            return Err(rocket);
        };
        let ledger = config.new_ledger();
        info!(
            "Ledger online, administered by {}, trusting @{}",
            ledger.administrator(),
            config.trusted_email_domain
        );

        // Manage the state.
        rocket = rocket.manage(ledger);
        Ok(rocket)
    }
}


#[cfg(test)]
mod tests {
    use rocket::figment::{providers::Serialized, Figment};
    use rocket::serde::json::serde_json::json;

    use super::*;

    #[test]
    fn config_extracted_from_figment() {
        let figment = Figment::from(Serialized::defaults(json!({
            "admin_identity": "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1",
            "trusted_email_domain": "@asu.edu",
            "auth_ttl": 600,
            "jwt_secret": "secret",
            "admin_password_hash": "$argon2i$v=19$m=4096,t=3,p=1$c2FsdHNhbHQ$aGFzaA",
        })));
        let config = figment.extract::<Config>().unwrap();

        assert_eq!(config.admin_identity(), &Identity::example_admin());
        assert_eq!(config.trusted_domain(), TrustedDomain::example());
        assert_eq!(config.auth_ttl(), Duration::minutes(10));
        assert_eq!(config.jwt_secret(), b"secret");
    }

    #[test]
    fn new_ledgers_are_empty_and_independent() {
        let config = Config::example();
        let ledger = config.new_ledger();
        assert_eq!(ledger.administrator(), config.admin_identity());
        assert_eq!(ledger.read(|r| r.elections.elections().count()), 0);
        assert_eq!(ledger.read(|r| r.courses.courses().count()), 0);
    }
}
