//! Address Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::addresses::AddressesServiceError;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::NotFound => StatusError::not_found().brief("Address not found"),
        error @ AddressesServiceError::BlankField(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        AddressesServiceError::InvalidReference => {
            StatusError::conflict().brief("Address is used by an order")
        }
        AddressesServiceError::MissingRequiredData | AddressesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid address payload")
        }
        AddressesServiceError::Sql(source) => {
            error!("address storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
