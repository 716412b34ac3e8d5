use std::fmt::{Display, Formatter};

use rocket::{
    http::{
        impl_from_uri_param_identity,
        uri::fmt::{Path, UriDisplay},
    },
    request::FromParam,
};
use serde::{Deserialize, Serialize};

/// An opaque caller identity, as established by the transport layer.
///
/// The ledger never interprets the contents; identities are only ever
/// compared for equality with the administrator and with stored voter and
/// submitter identities.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}

impl<'a> FromParam<'a> for Identity {
    type Error = &'a str;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        if param.is_empty() {
            Err(param)
        } else {
            Ok(Self::new(param))
        }
    }
}

impl UriDisplay<Path> for Identity {
    fn fmt(&self, formatter: &mut rocket::http::uri::fmt::Formatter<'_, Path>) -> std::fmt::Result {
        formatter.write_value(&self.0)
    }
}

impl_from_uri_param_identity!([Path] Identity);
