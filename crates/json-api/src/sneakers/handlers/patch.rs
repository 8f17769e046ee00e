//! Patch Sneaker Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::sneakers::data::SneakerPatch;

use crate::{
    extensions::*,
    sneakers::{errors::into_status_error, get::SneakerResponse},
    state::State,
};

/// Patch Sneaker Request
///
/// Absent fields keep their current value. `"image_url": null` removes the image.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PatchSneakerRequest {
    pub brand: Option<String>,
    pub color: Option<String>,
    #[serde(deserialize_with = "present")]
    #[salvo(schema(value_type = Option<String>))]
    pub image_url: Option<Option<String>>,
}

/// Any value that is present, `null` included, becomes `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<PatchSneakerRequest> for SneakerPatch {
    fn from(request: PatchSneakerRequest) -> Self {
        SneakerPatch {
            brand: request.brand,
            color: request.color,
            image_url: request.image_url,
        }
    }
}

/// Patch Sneaker Handler
#[endpoint(
    tags("sneakers"),
    summary = "Patch Sneaker",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<PatchSneakerRequest>,
    depot: &mut Depot,
) -> Result<Json<SneakerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let sneaker = state
        .app
        .sneakers
        .patch_sneaker(account, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sneaker.into()))
}
