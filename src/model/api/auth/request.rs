use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::common::Identity;

/// A request to open a session as a particular identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>, // Only extracted via `authenticate()`
}

impl SessionRequest {
    /// Check the request, revealing the identity if a session may be opened for it.
    ///
    /// Only the administrator identity is password protected; any other
    /// identity is taken as already authenticated upstream.
    pub fn authenticate(self, config: &Config) -> Result<Identity> {
        if &self.identity != config.admin_identity() {
            return Ok(self.identity);
        }

        let Some(password) = self.password else {
            warn!("Administrator session requested without a password");
            return Err(Error::Unauthenticated(
                "administrator password required".to_string(),
            ));
        };
        if argon2::verify_encoded(config.admin_password_hash(), password.as_bytes())? {
            Ok(self.identity)
        } else {
            warn!("Administrator session requested with a wrong password");
            Err(Error::Unauthenticated(
                "incorrect administrator password".to_string(),
            ))
        }
    }
}
