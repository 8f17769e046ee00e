//! Account Records

use jiff::Timestamp;

use crate::{auth::UserUuid, domain::addresses::records::AddressRecord, uuids::TypedUuid};

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Account Record
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub user_uuid: UserUuid,
    pub name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile of an account together with its user and main address.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    pub account: AccountUuid,
    pub name: Option<String>,
    pub email: String,
    pub mobile: Option<String>,
    pub profile_picture_url: Option<String>,
    pub is_email_verified: bool,
    pub main_address: Option<AddressRecord>,
}
