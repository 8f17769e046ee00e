//! Replace Sneaker Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    sneakers::{create::SneakerRequest, errors::into_status_error, get::SneakerResponse},
    state::State,
};

/// Replace Sneaker Handler
///
/// Every field is overwritten; an absent `image_url` clears the image.
#[endpoint(
    tags("sneakers"),
    summary = "Replace Sneaker",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<SneakerRequest>,
    depot: &mut Depot,
) -> Result<Json<SneakerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let sneaker = state
        .app
        .sneakers
        .replace_sneaker(account, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sneaker.into()))
}
