//! Sneakers service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum SneakersServiceError {
    #[error("sneaker not found")]
    NotFound,

    #[error("{0} cannot be blank")]
    BlankField(&'static str),

    #[error("sneaker is referenced by another resource")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SneakersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::DanglingReference) => Self::InvalidReference,
            Some(Failure::NullColumn) => Self::MissingRequiredData,
            Some(Failure::CheckRejected | Failure::Duplicate) => Self::InvalidData,
            None => Self::Sql(error),
        }
    }
}
