//! Sneaker Records

use jiff::Timestamp;

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Sneaker UUID
pub type SneakerUuid = TypedUuid<SneakerRecord>;

/// Sneaker Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SneakerRecord {
    pub uuid: SneakerUuid,
    pub account_uuid: AccountUuid,
    pub brand: String,
    pub color: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
