//! Orders service errors.

use rust_decimal::Decimal;
use shoeclean::{pricing::PricingError, vouchers::VoucherError};
use sqlx::Error;
use thiserror::Error;

use crate::database::{Failure, classify};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("address not found")]
    AddressNotFound,

    #[error("no catalog for this service type")]
    CatalogNotFound,

    #[error("voucher not found")]
    VoucherNotFound,

    #[error("total pairs must be greater than zero")]
    NoPairs,

    #[error("order must contain at least one of your sneakers")]
    NoSneakers,

    #[error("an order holds at most {0} pairs")]
    TooManyPairs(u32),

    #[error("order amount exceeds {0}")]
    AmountTooLarge(Decimal),

    #[error("order is already confirmed")]
    AlreadyConfirmed,

    #[error("could not allocate a unique USC ID")]
    UscIdExhausted,

    #[error(transparent)]
    Voucher(#[from] VoucherError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("order references a missing resource")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Map a missing row to `not_found`, anything else as usual.
    pub(crate) fn missing(not_found: Self) -> impl FnOnce(Error) -> Self {
        move |error| match error {
            Error::RowNotFound => not_found,
            error => Self::from(error),
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::Duplicate) => Self::AlreadyConfirmed,
            Some(Failure::DanglingReference) => Self::InvalidReference,
            Some(Failure::CheckRejected | Failure::NullColumn) => Self::InvalidData,
            None => Self::Sql(error),
        }
    }
}
