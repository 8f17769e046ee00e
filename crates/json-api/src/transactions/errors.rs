//! Transaction Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::transactions::TransactionsServiceError;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::NotFound => {
            StatusError::not_found().brief("Transaction not found")
        }
        TransactionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Order already has a transaction")
        }
        TransactionsServiceError::InvalidDateRange => {
            StatusError::bad_request().brief(error.to_string())
        }
        TransactionsServiceError::InvalidReference | TransactionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid transaction data")
        }
        TransactionsServiceError::Sql(source) => {
            error!("transaction storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
