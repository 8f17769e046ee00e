//! Address Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    addresses::{errors::into_status_error, get::AddressResponse},
    extensions::*,
    pagination::{self, DEFAULT_PAGE_SIZE, PageMeta},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressesResponse {
    /// Addresses on this page, sorted by label
    pub addresses: Vec<AddressResponse>,

    pub page: PageMeta,
}

/// Address Index Handler
///
/// Lists the caller's addresses. `filter` matches any text field.
#[endpoint(
    tags("addresses"),
    summary = "List Addresses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filter: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<AddressesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let addresses = state
        .app
        .addresses
        .list_addresses(
            account,
            pagination::filter(filter),
            pagination::page_request(page, size, DEFAULT_PAGE_SIZE),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(AddressesResponse {
        page: PageMeta::from(&addresses),
        addresses: addresses.items.into_iter().map(Into::into).collect(),
    }))
}
