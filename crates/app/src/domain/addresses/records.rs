//! Address Records

use jiff::Timestamp;

use crate::{domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// Address UUID
pub type AddressUuid = TypedUuid<AddressRecord>;

/// Address Record
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub uuid: AddressUuid,
    pub account_uuid: AccountUuid,
    pub label: String,
    pub line: String,
    pub city: String,
    pub district: String,
    pub subdistrict: String,
    pub state: String,
    pub is_main: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
