//! User Records

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{auth::RoleName, domain::accounts::records::AccountUuid, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Free-form profile data stored alongside a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// User Record
#[derive(Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub mobile: Option<String>,
    pub attributes: UserAttributes,
    pub token_uid: Option<String>,
    pub email_verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("uuid", &self.uuid)
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("attributes", &self.attributes)
            .field("email_verified_at", &self.email_verified_at)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub account: AccountUuid,
    pub roles: Vec<RoleName>,
}

impl Principal {
    #[must_use]
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }
}

/// A freshly signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub bearer_token: String,
    pub roles: Vec<RoleName>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("bearer_token", &"**redacted**")
            .field("roles", &self.roles)
            .finish()
    }
}
