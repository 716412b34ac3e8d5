mod request;
mod token;

pub use request::SessionRequest;
pub use token::{AuthToken, SessionFailure, AUTH_TOKEN_COOKIE};
