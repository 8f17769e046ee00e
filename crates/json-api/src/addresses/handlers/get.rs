//! Get Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::addresses::records::AddressRecord;

use crate::{addresses::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    /// The unique identifier of the address
    pub uuid: Uuid,

    /// A name for the address, e.g. "Home"
    pub label: String,

    /// Street and number
    pub line: String,

    pub city: String,

    pub district: String,

    pub subdistrict: String,

    /// Province
    pub state: String,

    /// Whether this is the account's main address
    pub is_main: bool,

    /// The date and time the address was created
    pub created_at: String,

    /// The date and time the address was last updated
    pub updated_at: String,
}

impl From<AddressRecord> for AddressResponse {
    fn from(address: AddressRecord) -> Self {
        AddressResponse {
            uuid: address.uuid.into(),
            label: address.label,
            line: address.line,
            city: address.city,
            district: address.district,
            subdistrict: address.subdistrict,
            state: address.state,
            is_main: address.is_main,
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
        }
    }
}

/// Get Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Get Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let address = state
        .app
        .addresses
        .get_address(account, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}
