//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AccountsServiceError::Sql(source) => {
            error!("failed to load account: {source}");

            StatusError::internal_server_error()
        }
    }
}
