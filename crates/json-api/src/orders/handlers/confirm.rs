//! Confirm Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use shoeclean::transactions::TransactionMethod;
use shoeclean_app::domain::orders::data::OrderConfirmation;

use crate::{
    extensions::*, observability::record_order_confirmed, orders::errors::into_status_error,
    state::State,
};

/// Confirm Order Request
///
/// The body is optional. Without one the order is paid cash on delivery and
/// no voucher is applied.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ConfirmOrderRequest {
    /// CASH_ON_DELIVERY or BANK_TRANSFER
    pub method: Option<String>,

    pub voucher_code: Option<String>,
}

impl TryFrom<ConfirmOrderRequest> for OrderConfirmation {
    type Error = StatusError;

    fn try_from(request: ConfirmOrderRequest) -> Result<Self, Self::Error> {
        let method = match request.method {
            Some(method) => method.parse::<TransactionMethod>().or_400("invalid method")?,
            None => TransactionMethod::default(),
        };

        Ok(OrderConfirmation {
            method,
            voucher_code: request
                .voucher_code
                .map(|code| code.trim().to_owned())
                .filter(|code| !code.is_empty()),
        })
    }
}

async fn confirmation(req: &mut Request) -> Result<OrderConfirmation, StatusError> {
    let payload = req.payload().await.or_400("could not read request body")?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(OrderConfirmation::default());
    }

    serde_json::from_slice::<ConfirmOrderRequest>(payload)
        .or_400("invalid confirmation body")?
        .try_into()
}

/// Confirm Order Handler
///
/// Redeems the voucher, if any, and records the transaction.
#[endpoint(
    tags("orders"),
    summary = "Confirm Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order confirmed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Voucher is exhausted or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or voucher not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is already confirmed"),
    ),
)]
pub(crate) async fn handler(
    usc_id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let confirmation = confirmation(req).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;
    let usc_id = usc_id.into_inner();
    let with_voucher = confirmation.voucher_code.is_some();

    let transaction = state
        .app
        .orders
        .confirm_order(account, &usc_id, confirmation)
        .await
        .map_err(into_status_error)?;

    info!(
        usc_id = %usc_id,
        transaction_uuid = %transaction.uuid,
        "order confirmed"
    );

    record_order_confirmed(transaction.method.as_str(), with_voucher);

    Ok(StatusCode::NO_CONTENT)
}
