//! Notification Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use shoeclean::labels::UnknownLabelError;

use crate::uuids::TypedUuid;

pub type NotificationLogUuid = TypedUuid<NotificationLogRecord>;

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    Email,
    Push,
    Sms,
}

impl NotificationChannel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Push => "PUSH",
            Self::Sms => "SMS",
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationChannel {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Email, Self::Push, Self::Sms]
            .into_iter()
            .find(|channel| channel.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("notification channel", value))
    }
}

/// Delivery state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Pending,
    Success,
    Failed,
}

impl NotificationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Pending, Self::Success, Self::Failed]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("notification status", value))
    }
}

/// Notification Log Record
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLogRecord {
    pub uuid: NotificationLogUuid,
    pub channel: NotificationChannel,
    pub recipient: String,
    pub subject: String,
    pub status: NotificationStatus,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
