//! Preview Voucher Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderDetailsResponse},
    state::State,
};

/// Preview Voucher Handler
///
/// Prices the order as if `voucher_code` were applied. The voucher is not redeemed.
#[endpoint(
    tags("orders"),
    summary = "Preview Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Priced with the voucher"),
        (status_code = StatusCode::BAD_REQUEST, description = "Voucher is exhausted or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or voucher not found"),
    ),
)]
pub(crate) async fn handler(
    usc_id: PathParam<String>,
    voucher_code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let details = state
        .app
        .orders
        .preview_voucher(account, &usc_id.into_inner(), &voucher_code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
