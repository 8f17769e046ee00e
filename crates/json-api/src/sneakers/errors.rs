//! Sneaker Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::sneakers::SneakersServiceError;

pub(crate) fn into_status_error(error: SneakersServiceError) -> StatusError {
    match error {
        SneakersServiceError::NotFound => StatusError::not_found().brief("Sneaker not found"),
        SneakersServiceError::BlankField(_) => StatusError::bad_request().brief(error.to_string()),
        SneakersServiceError::InvalidReference => {
            StatusError::conflict().brief("Sneaker is part of an order")
        }
        SneakersServiceError::MissingRequiredData | SneakersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid sneaker payload")
        }
        SneakersServiceError::Sql(source) => {
            error!("sneaker storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
