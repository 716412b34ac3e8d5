use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use log::warn;
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::common::Identity;

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token naming the caller of a request.
///
/// The token carries no rights of its own. Whether the caller may do something
/// is decided by the ledger when the operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "sub")]
    pub identity: Identity,
}

impl AuthToken {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    /// Serialize this token into a cookie.
    pub fn into_cookie(self, config: &Config) -> Result<Cookie<'static>, Error> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )?;

        Ok(Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish())
    }

    /// Deserialize a token from a cookie, checking its signature and expiry.
    pub fn from_cookie(cookie: &Cookie<'_>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    token: AuthToken,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

/// Why the session guard turned a request away, kept in the request's local
/// cache for the error catchers.
#[derive(Debug, Clone, Default)]
pub struct SessionFailure(pub Option<String>);

impl SessionFailure {
    /// The recorded reason, if the session guard failed on this request.
    pub fn of(req: &Request<'_>) -> Option<String> {
        req.local_cache(SessionFailure::default).0.clone()
    }
}

fn fail(req: &Request<'_>, status: Status, err: Error) -> Outcome<AuthToken, Error> {
    req.local_cache(|| SessionFailure(Some(err.to_string())));
    Outcome::Failure((status, err))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthToken {
    type Error = Error;

    /// Get an [`AuthToken`] from the session cookie. Requests without a valid
    /// session are rejected outright rather than forwarded.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match req.guard::<&State<Config>>().await {
            Outcome::Success(config) => config,
            _ => {
                return fail(
                    req,
                    Status::InternalServerError,
                    Error::Internal("no session configuration".to_string()),
                )
            }
        };

        let Some(cookie) = req.cookies().get(AUTH_TOKEN_COOKIE) else {
            return fail(
                req,
                Status::Unauthorized,
                Error::Unauthenticated("no session cookie".to_string()),
            );
        };

        match Self::from_cookie(cookie, config) {
            Ok(token) => Outcome::Success(token),
            Err(err) => {
                warn!("Rejected session cookie: {err}");
                fail(req, Status::Unauthorized, err)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_identity() {
        let config = Config::example();
        let cookie = AuthToken::example_voter().into_cookie(&config).unwrap();

        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(
            AuthToken::from_cookie(&cookie, &config).unwrap(),
            AuthToken::example_voter()
        );
    }

    #[test]
    fn tampered_cookie_rejected() {
        let config = Config::example();
        let cookie = AuthToken::example_admin().into_cookie(&config).unwrap();
        let forged = Cookie::new(AUTH_TOKEN_COOKIE, format!("{}x", cookie.value()));
        assert!(matches!(
            AuthToken::from_cookie(&forged, &config),
            Err(Error::Jwt(_))
        ));
    }

    #[test]
    fn expired_cookie_rejected() {
        let config = Config::example();
        let claims = Claims {
            token: AuthToken::example_voter(),
            expire_at: Utc::now() - chrono::Duration::hours(1),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .unwrap();
        let cookie = Cookie::new(AUTH_TOKEN_COOKIE, token);
        assert!(matches!(
            AuthToken::from_cookie(&cookie, &config),
            Err(Error::Jwt(_))
        ));
    }
}
