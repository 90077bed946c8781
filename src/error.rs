use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use log::{debug, error};
use rocket::{
    http::{Status, StatusClass},
    response::{self, status, Responder},
    Request,
};
use thiserror::Error;

use crate::model::election::ElectionError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Election(#[from] ElectionError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Argon2(#[from] argon2::Error),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Election(err) => match err {
                ElectionError::Unauthorized { .. } | ElectionError::NotAVoter { .. } => {
                    Status::Forbidden
                }
                ElectionError::PhaseNotOpen { .. }
                | ElectionError::AlreadyRegistered { .. }
                | ElectionError::AlreadyVoted { .. } => Status::Conflict,
                ElectionError::EmptyProposal => Status::BadRequest,
                ElectionError::ProposalNotFound { .. } => Status::NotFound,
            },
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                    Status::Unauthorized
                }
                _ => Status::BadRequest,
            },
            // Only a misconfigured password hash can get us here.
            Self::Argon2(_) => Status::InternalServerError,
            Self::Status(status, _) => *status,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.status();
        if status.class() == StatusClass::ServerError {
            error!("{self}");
        } else {
            debug!("Rejected request: {self}");
        }
        status::Custom(status, self.to_string()).respond_to(req)
    }
}
