//! Vouchers
//!
//! A voucher reduces the cost of an order either by a flat or percentage amount
//! ([`VoucherType::Discount`]) or by making a number of pairs free
//! ([`VoucherType::FreePair`]). Before a voucher is applied it must pass [`validate`].

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::labels::UnknownLabelError;

/// How the voucher amount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoucherType {
    /// The amount is subtracted from the subtotal.
    Discount,

    /// The amount is a number of pairs cleaned for free.
    FreePair,
}

impl VoucherType {
    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discount => "DISCOUNT",
            Self::FreePair => "FREE_PAIR",
        }
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoucherType {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Discount, Self::FreePair]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("voucher type", value))
    }
}

/// Unit of a [`VoucherType::Discount`] amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmountType {
    /// A flat currency amount.
    #[default]
    Amount,

    /// A percentage of the subtotal.
    Percentage,
}

impl AmountType {
    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "AMOUNT",
            Self::Percentage => "PERCENTAGE",
        }
    }
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmountType {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Amount, Self::Percentage]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("amount type", value))
    }
}

/// The part of a voucher that affects pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherDiscount {
    /// Discount or free pairs.
    pub voucher_type: VoucherType,

    /// Flat amount or percentage; only meaningful for [`VoucherType::Discount`].
    pub amount_type: AmountType,

    /// The voucher amount, interpreted per `voucher_type`.
    pub amount: Decimal,
}

impl VoucherDiscount {
    /// A flat discount of `amount`.
    #[must_use]
    pub fn flat(amount: Decimal) -> Self {
        Self {
            voucher_type: VoucherType::Discount,
            amount_type: AmountType::Amount,
            amount,
        }
    }

    /// A discount of `percentage` percent of the subtotal.
    #[must_use]
    pub fn percentage(percentage: Decimal) -> Self {
        Self {
            voucher_type: VoucherType::Discount,
            amount_type: AmountType::Percentage,
            amount: percentage,
        }
    }

    /// `pairs` pairs cleaned for free.
    #[must_use]
    pub fn free_pairs(pairs: u32) -> Self {
        Self {
            voucher_type: VoucherType::FreePair,
            amount_type: AmountType::Amount,
            amount: Decimal::from(pairs),
        }
    }
}

/// Anything carrying a voucher quota and expiry.
pub trait Redeemable {
    /// Remaining number of redemptions.
    fn remaining_quantity(&self) -> i32;

    /// Moment the voucher stops being valid.
    fn expired_at(&self) -> Timestamp;
}

/// Reasons a voucher cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// No redemptions remain.
    #[error("quota for this voucher is {quantity}")]
    QuotaExceeded {
        /// The remaining quantity at validation time.
        quantity: i32,
    },

    /// The voucher expiry has passed.
    #[error("voucher is already expired at {expired_at}")]
    Expired {
        /// When the voucher expired.
        expired_at: Timestamp,
    },
}

/// Check that a voucher may be applied at `now`.
///
/// The quota is checked before the expiry. The voucher is returned unchanged;
/// consuming a redemption is left to the caller.
///
/// # Errors
///
/// - [`VoucherError::QuotaExceeded`]: the remaining quantity is zero or negative.
/// - [`VoucherError::Expired`]: `expired_at` is at or before `now`.
pub fn validate<V: Redeemable>(voucher: V, now: Timestamp) -> Result<V, VoucherError> {
    let quantity = voucher.remaining_quantity();

    if quantity <= 0 {
        return Err(VoucherError::QuotaExceeded { quantity });
    }

    let expired_at = voucher.expired_at();

    if expired_at <= now {
        return Err(VoucherError::Expired { expired_at });
    }

    Ok(voucher)
}
