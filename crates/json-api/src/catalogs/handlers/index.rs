//! Catalog Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::catalogs::records::CatalogRecord;

use crate::{catalogs::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    pub uuid: Uuid,

    /// DEEP_CLEANING, RAPID_CLEANING or REPAIR
    pub service_type: String,

    pub description: String,

    /// Price per pair as a decimal string
    pub price: String,

    pub updated_at: String,
}

impl From<CatalogRecord> for CatalogResponse {
    fn from(catalog: CatalogRecord) -> Self {
        Self {
            uuid: catalog.uuid.into(),
            service_type: catalog.service_type.to_string(),
            description: catalog.description,
            price: catalog.price.to_string(),
            updated_at: catalog.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogsResponse {
    pub catalogs: Vec<CatalogResponse>,
}

/// Catalog Index Handler
///
/// Lists every cleaning service and its price.
#[endpoint(
    tags("catalogs"),
    summary = "List Catalogs",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CatalogsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let catalogs = state
        .app
        .catalogs
        .list_catalogs()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CatalogsResponse {
        catalogs: catalogs.into_iter().map(Into::into).collect(),
    }))
}
