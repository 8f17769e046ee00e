//! JWT issuing and validation.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    auth::{Principal, RoleName, UserUuid},
    domain::accounts::records::AccountUuid,
};

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID
    pub sub: String,

    /// Account UUID
    pub account: String,

    /// Role names, e.g. `ROLE_USER`
    pub roles: Vec<String>,

    /// Issued at (Unix seconds)
    pub iat: i64,

    /// Expiry (Unix seconds)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token claims are malformed")]
    MalformedClaims,
}

/// Signs and validates HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtManager {
    secret: Zeroizing<String>,
    ttl: SignedDuration,
}

impl fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtManager")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtManager {
    #[must_use]
    pub fn new(secret: impl Into<String>, ttl: SignedDuration) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
        }
    }

    /// Sign a token for `principal`, issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue(&self, principal: &Principal, now: Timestamp) -> Result<String, TokenError> {
        let iat = now.as_second();

        let claims = Claims {
            sub: principal.user.to_string(),
            account: principal.account.to_string(),
            roles: principal
                .roles
                .iter()
                .map(|role| role.as_str().to_string())
                .collect(),
            iat,
            exp: iat.saturating_add(self.ttl.as_secs()),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Signing)
    }

    /// Validate a token's signature and expiry and return its principal.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Invalid`]: bad signature, expired or undecodable.
    /// - [`TokenError::MalformedClaims`]: the claims do not name a user, account and roles.
    pub fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(TokenError::Invalid)?;

        let claims = data.claims;

        let user = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::MalformedClaims)?;
        let account = Uuid::parse_str(&claims.account).map_err(|_| TokenError::MalformedClaims)?;

        let roles = claims
            .roles
            .iter()
            .map(|role| role.parse::<RoleName>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TokenError::MalformedClaims)?;

        Ok(Principal {
            user: UserUuid::from_uuid(user),
            account: AccountUuid::from_uuid(account),
            roles,
        })
    }
}
