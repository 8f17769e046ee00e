//! Transactions service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("transaction not found")]
    NotFound,

    #[error("transaction already exists for this order")]
    AlreadyExists,

    #[error("created_from must not be after created_to")]
    InvalidDateRange,

    #[error("transaction references a missing order")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TransactionsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::Duplicate) => Self::AlreadyExists,
            Some(Failure::DanglingReference) => Self::InvalidReference,
            Some(Failure::CheckRejected | Failure::NullColumn) => Self::InvalidData,
            None => Self::Sql(error),
        }
    }
}
