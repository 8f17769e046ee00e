//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use shoeclean_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound
        | OrdersServiceError::AddressNotFound
        | OrdersServiceError::CatalogNotFound
        | OrdersServiceError::VoucherNotFound => StatusError::not_found().brief(error.to_string()),
        OrdersServiceError::NoPairs
        | OrdersServiceError::NoSneakers
        | OrdersServiceError::TooManyPairs(_)
        | OrdersServiceError::AmountTooLarge(_)
        | OrdersServiceError::Voucher(_)
        | OrdersServiceError::Pricing(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::AlreadyConfirmed => StatusError::conflict().brief(error.to_string()),
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::UscIdExhausted => {
            error!("gave up allocating a USC ID");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
