//! Notifications service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("notification log not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for NotificationsServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::CheckRejected | Failure::NullColumn) => Self::InvalidData,
            Some(Failure::DanglingReference) | Some(Failure::Duplicate) | None => Self::Sql(error),
        }
    }
}
