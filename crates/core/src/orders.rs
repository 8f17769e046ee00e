//! Orders

use std::{fmt, str::FromStr};

use jiff::{Timestamp, tz::TimeZone};
use rand::Rng;

use crate::labels::UnknownLabelError;

/// Prefix of every USC ID.
pub const USC_ID_PREFIX: &str = "USCID";

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Created, waiting for the customer to confirm.
    PendingConfirmation,

    /// Confirmed, waiting for pickup.
    Pending,

    /// Courier is collecting the sneakers.
    OnPickup,

    /// Sneakers are being cleaned.
    Cleaning,

    /// Courier is returning the sneakers.
    OnDelivery,

    /// Returned to the customer.
    Delivered,

    /// Cancelled before delivery.
    Canceled,
}

impl OrderStatus {
    const ALL: [OrderStatus; 7] = [
        Self::PendingConfirmation,
        Self::Pending,
        Self::OnPickup,
        Self::Cleaning,
        Self::OnDelivery,
        Self::Delivered,
        Self::Canceled,
    ];

    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingConfirmation => "PENDING_CONFIRMATION",
            Self::Pending => "PENDING",
            Self::OnPickup => "ON_PICKUP",
            Self::Cleaning => "CLEANING",
            Self::OnDelivery => "ON_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Whether the order can no longer change state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("order status", value))
    }
}

/// Format a USC ID for an order placed at `placed_at` with the given running number.
///
/// The layout is `USCID-` followed by the two digit UTC year, the three digit day of
/// the year and the running number padded to at least three digits.
#[must_use]
pub fn format_usc_id(placed_at: Timestamp, running_number: u16) -> String {
    let date = placed_at.to_zoned(TimeZone::UTC).date();
    let year = date.year().rem_euclid(100);
    let day_of_year = date.day_of_year();

    format!("{USC_ID_PREFIX}-{year:02}{day_of_year:03}{running_number:03}")
}

/// Generate a USC ID with a random running number between 1 and 9999.
#[must_use]
pub fn generate_usc_id<R: Rng>(placed_at: Timestamp, rng: &mut R) -> String {
    format_usc_id(placed_at, rng.gen_range(1..=9999))
}
