//! Voucher Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::vouchers::VouchersServiceError;

pub(crate) fn into_status_error(error: VouchersServiceError) -> StatusError {
    match error {
        VouchersServiceError::NotFound => StatusError::not_found().brief("Voucher not found"),
        VouchersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Voucher code already exists")
        }
        VouchersServiceError::BlankCode | VouchersServiceError::Unavailable(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        VouchersServiceError::MissingRequiredData | VouchersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid voucher payload")
        }
        VouchersServiceError::Sql(source) => {
            error!("voucher storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
