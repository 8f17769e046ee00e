//! Catalogs service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum CatalogsServiceError {
    #[error("catalog not found")]
    NotFound,

    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::NullColumn) => Self::MissingRequiredData,
            Some(Failure::CheckRejected) => Self::InvalidData,
            Some(Failure::DanglingReference) | Some(Failure::Duplicate) | None => Self::Sql(error),
        }
    }
}
