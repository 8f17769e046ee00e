//! Vouchers service errors.

use shoeclean::vouchers::VoucherError;
use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum VouchersServiceError {
    #[error("voucher already exists")]
    AlreadyExists,

    #[error("voucher not found")]
    NotFound,

    #[error("voucher code cannot be blank")]
    BlankCode,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Unavailable(#[from] VoucherError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for VouchersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::Duplicate) => Self::AlreadyExists,
            Some(Failure::NullColumn) => Self::MissingRequiredData,
            Some(Failure::CheckRejected) => Self::InvalidData,
            Some(Failure::DanglingReference) | None => Self::Sql(error),
        }
    }
}
