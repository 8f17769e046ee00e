//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::orders::records::OrderDetails;

use crate::{
    addresses::get::AddressResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// A priced order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub usc_id: String,

    /// Pickup and delivery address
    pub address: AddressResponse,

    pub sneakers: Vec<Uuid>,

    pub total_pairs: u32,

    pub service_type: String,

    pub status: String,

    pub voucher_code: Option<String>,

    /// Catalog price of one pair
    pub price: String,

    pub subtotal: String,

    pub discount: String,

    pub delivery_fee: String,

    /// `subtotal - discount + delivery_fee`
    pub total_amount: String,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            usc_id: details.usc_id,
            address: details.address.into(),
            sneakers: details.sneakers.into_iter().map(Into::into).collect(),
            total_pairs: details.total_pairs,
            service_type: details.service_type.to_string(),
            status: details.status.to_string(),
            voucher_code: details.voucher_code,
            price: details.price.to_string(),
            subtotal: details.subtotal.to_string(),
            discount: details.discount.to_string(),
            delivery_fee: details.delivery_fee.to_string(),
            total_amount: details.total_amount.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Prices the order with the voucher attached at confirmation, if any.
#[endpoint(
    tags("orders"),
    summary = "Order Details",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    usc_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let details = state
        .app
        .orders
        .get_order_details(account, &usc_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
