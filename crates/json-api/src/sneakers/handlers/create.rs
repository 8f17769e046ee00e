//! Create Sneaker Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shoeclean_app::domain::sneakers::data::NewSneaker;

use crate::{
    extensions::*,
    sneakers::{errors::into_status_error, get::SneakerResponse},
    state::State,
};

/// Sneaker Request
///
/// Shared by create and replace.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakerRequest {
    pub brand: String,
    pub color: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<SneakerRequest> for NewSneaker {
    fn from(request: SneakerRequest) -> Self {
        NewSneaker {
            brand: request.brand,
            color: request.color,
            image_url: request.image_url,
        }
    }
}

/// Create Sneaker Handler
#[endpoint(
    tags("sneakers"),
    summary = "Create Sneaker",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sneaker created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SneakerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SneakerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let sneaker = state
        .app
        .sneakers
        .create_sneaker(account, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/v1/sneakers/{}", sneaker.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(sneaker.into()))
}
