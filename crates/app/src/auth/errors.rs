//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::{PasswordError, TokenError},
    database::{Failure, classify},
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user not found")]
    NotFound,

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("email or password is incorrect")]
    BadCredentials,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("bearer token is invalid or expired")]
    InvalidToken,

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match classify(&error) {
            Some(Failure::Missing) => Self::NotFound,
            Some(Failure::Duplicate) => Self::DuplicateEmail,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid(_) | TokenError::MalformedClaims => Self::InvalidToken,
            TokenError::Signing(_) => Self::Token(error),
        }
    }
}
