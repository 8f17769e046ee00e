//! Get Sneaker Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::sneakers::records::SneakerRecord;

use crate::{extensions::*, sneakers::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakerResponse {
    pub uuid: Uuid,
    pub brand: String,
    pub color: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SneakerRecord> for SneakerResponse {
    fn from(sneaker: SneakerRecord) -> Self {
        Self {
            uuid: sneaker.uuid.into(),
            brand: sneaker.brand,
            color: sneaker.color,
            image_url: sneaker.image_url,
            created_at: sneaker.created_at.to_string(),
            updated_at: sneaker.updated_at.to_string(),
        }
    }
}

/// Get Sneaker Handler
#[endpoint(
    tags("sneakers"),
    summary = "Get Sneaker",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SneakerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let sneaker = state
        .app
        .sneakers
        .get_sneaker(account, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sneaker.into()))
}
