//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::catalogs::CatalogsServiceError;

pub(crate) fn into_status_error(error: CatalogsServiceError) -> StatusError {
    match error {
        CatalogsServiceError::NotFound => StatusError::not_found().brief("Catalog not found"),
        CatalogsServiceError::NonPositivePrice => {
            StatusError::bad_request().brief("Price must be greater than zero")
        }
        CatalogsServiceError::MissingRequiredData | CatalogsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        CatalogsServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
