//! Transactions Data

use jiff::Timestamp;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Narrows a transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive fragment of the order's USC ID.
    pub usc_id: Option<String>,

    /// Earliest creation time, inclusive. Defaults to the Unix epoch.
    pub created_from: Option<Timestamp>,

    /// Latest creation time, inclusive. Defaults to now.
    pub created_to: Option<Timestamp>,
}

impl TransactionFilter {
    /// The creation window with defaults applied.
    #[must_use]
    pub fn window(&self, now: Timestamp) -> (Timestamp, Timestamp) {
        (
            self.created_from.unwrap_or(Timestamp::UNIX_EPOCH),
            self.created_to.unwrap_or(now),
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    #[test]
    fn window_defaults_to_epoch_and_now() {
        let now = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(1000);

        assert_eq!(
            TransactionFilter::default().window(now),
            (Timestamp::UNIX_EPOCH, now)
        );
    }

    #[test]
    fn explicit_window_is_kept() {
        let from = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(1);
        let to = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(2);

        let filter = TransactionFilter {
            usc_id: None,
            created_from: Some(from),
            created_to: Some(to),
        };

        assert_eq!(filter.window(Timestamp::UNIX_EPOCH), (from, to));
    }
}
