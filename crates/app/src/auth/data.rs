//! Auth Data

use std::fmt;

use zeroize::Zeroizing;

/// Registration details.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: Zeroizing<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("name", &self.name)
            .field("mobile", &self.mobile)
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}
