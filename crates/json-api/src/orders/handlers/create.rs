//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean::catalog::ServiceType;
use shoeclean_app::domain::orders::data::NewOrder;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// One of the caller's addresses
    pub address: Uuid,

    /// The caller's sneakers to be cleaned
    pub sneakers: Vec<Uuid>,

    /// DEEP_CLEANING, RAPID_CLEANING or REPAIR
    pub service_type: String,

    pub total_pairs: u32,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(NewOrder {
            address: request.address.into(),
            sneakers: request.sneakers.into_iter().map(Into::into).collect(),
            service_type: request
                .service_type
                .parse::<ServiceType>()
                .or_400("invalid service_type")?,
            total_pairs: request.total_pairs,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    pub usc_id: String,
}

/// Create Order Handler
///
/// Places an order awaiting confirmation.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Address or catalog not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;
    let order = NewOrder::try_from(json.into_inner())?;

    let order = state
        .app
        .orders
        .create_order(account, order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/v1/orders/{}", order.usc_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderCreatedResponse {
        usc_id: order.usc_id,
    }))
}
