use argon2::Error as Argon2Error;
use jsonwebtoken::errors::Error as JwtError;
use log::{error, warn};
use rocket::{http::Status, response::Responder, serde::json::Json, Request};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::common::{ErrorKind, LedgerError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Argon2(#[from] Argon2Error),
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::Ledger(err) => match err.kind() {
                ErrorKind::Unauthorized
                | ErrorKind::NotRegistered
                | ErrorKind::NotVerified
                | ErrorKind::ElectionInactive
                | ErrorKind::CourseClosed => Status::Forbidden,
                ErrorKind::NotFound | ErrorKind::IndexOutOfRange => Status::NotFound,
                ErrorKind::AlreadyRegistered
                | ErrorKind::AlreadyVoted
                | ErrorKind::AlreadyClosed
                | ErrorKind::DuplicateFeedback => Status::Conflict,
                ErrorKind::InvalidRating => Status::BadRequest,
            },
            Self::Jwt(_) | Self::Unauthenticated(_) => Status::Unauthorized,
            Self::Argon2(_) | Self::Internal(_) => Status::InternalServerError,
        }
    }

    /// The stable identifier reported to clients.
    pub fn label(&self) -> String {
        match self {
            Self::Ledger(err) => format!("{:?}", err.kind()),
            Self::Jwt(_) | Self::Unauthenticated(_) => "Unauthenticated".to_string(),
            Self::Argon2(_) | Self::Internal(_) => "Internal".to_string(),
        }
    }
}

/// The JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status.code >= 500 {
            error!("{self}");
        } else {
            warn!("{self}");
        }
        let body = ErrorBody {
            error: self.label(),
            message: self.to_string(),
        };
        (status, Json(body)).respond_to(req)
    }
}
