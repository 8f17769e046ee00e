//! Upsert Catalog Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shoeclean::catalog::ServiceType;
use shoeclean_app::domain::catalogs::data::NewCatalog;

use crate::{
    catalogs::{errors::into_status_error, index::CatalogResponse},
    extensions::*,
    state::State,
};

/// Upsert Catalog Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpsertCatalogRequest {
    /// DEEP_CLEANING, RAPID_CLEANING or REPAIR
    pub service_type: String,

    pub description: String,

    /// Price per pair as a decimal string
    pub price: String,
}

impl TryFrom<UpsertCatalogRequest> for NewCatalog {
    type Error = StatusError;

    fn try_from(request: UpsertCatalogRequest) -> Result<Self, Self::Error> {
        Ok(NewCatalog {
            service_type: request
                .service_type
                .parse::<ServiceType>()
                .or_400("invalid service_type")?,
            description: request.description,
            price: request.price.parse::<Decimal>().or_400("invalid price")?,
        })
    }
}

/// Upsert Catalog Handler
///
/// Creates the catalog entry for a service type or replaces its description and price.
#[endpoint(
    tags("backoffice"),
    summary = "Upsert Catalog",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Catalog saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "ROLE_ADMIN is required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpsertCatalogRequest>,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let catalog = NewCatalog::try_from(json.into_inner())?;

    let catalog = state
        .app
        .catalogs
        .upsert_catalog(catalog)
        .await
        .map_err(into_status_error)?;

    Ok(Json(catalog.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shoeclean_app::domain::catalogs::{
        CatalogsServiceError, MockCatalogsService,
        records::{CatalogRecord, CatalogUuid},
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(catalogs: MockCatalogsService) -> Service {
        Mocks {
            catalogs,
            ..Mocks::default()
        }
        .admin_service(Router::with_path("backoffice/catalogs").put(handler))
    }

    #[tokio::test]
    async fn test_upsert_parses_service_type_and_price() -> TestResult {
        let mut catalogs = MockCatalogsService::new();

        catalogs
            .expect_upsert_catalog()
            .once()
            .withf(|catalog| {
                catalog.service_type == ServiceType::RapidCleaning
                    && catalog.price == Decimal::new(8_500_000, 2)
            })
            .return_once(|catalog| {
                Ok(CatalogRecord {
                    uuid: CatalogUuid::new(),
                    service_type: catalog.service_type,
                    description: catalog.description,
                    price: catalog.price,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::put("http://example.com/backoffice/catalogs")
            .json(&json!({
                "service_type": "RAPID_CLEANING",
                "description": "Quick exterior clean",
                "price": "85000.00"
            }))
            .send(&make_service(catalogs))
            .await;

        let body: CatalogResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.price, "85000.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_service_type_returns_400() -> TestResult {
        let mut catalogs = MockCatalogsService::new();

        catalogs.expect_upsert_catalog().never();

        let res = TestClient::put("http://example.com/backoffice/catalogs")
            .json(&json!({
                "service_type": "DRY_CLEANING",
                "description": "Not offered",
                "price": "1.00"
            }))
            .send(&make_service(catalogs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_positive_price_returns_400() -> TestResult {
        let mut catalogs = MockCatalogsService::new();

        catalogs
            .expect_upsert_catalog()
            .once()
            .return_once(|_| Err(CatalogsServiceError::NonPositivePrice));

        let res = TestClient::put("http://example.com/backoffice/catalogs")
            .json(&json!({
                "service_type": "REPAIR",
                "description": "Sole repair",
                "price": "0"
            }))
            .send(&make_service(catalogs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
