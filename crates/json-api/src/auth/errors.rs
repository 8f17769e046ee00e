//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::DuplicateEmail => {
            StatusError::conflict().brief("Email is already registered")
        }
        AuthServiceError::BadCredentials => {
            StatusError::unauthorized().brief("Email or password is incorrect")
        }
        AuthServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Bearer token is invalid or expired")
        }
        error @ (AuthServiceError::InvalidEmail | AuthServiceError::WeakPassword(_)) => {
            StatusError::bad_request().brief(error.to_string())
        }
        AuthServiceError::Token(source) => {
            error!("failed to process bearer token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
