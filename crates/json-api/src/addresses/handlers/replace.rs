//! Replace Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::addresses::data::AddressUpdate;

use crate::{
    addresses::{errors::into_status_error, get::AddressResponse},
    extensions::*,
    state::State,
};

/// Replace Address Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceAddressRequest {
    pub label: String,
    pub line: String,
    pub city: String,
    pub district: String,
    pub subdistrict: String,
    pub state: String,
    pub is_main: bool,
}

impl From<ReplaceAddressRequest> for AddressUpdate {
    fn from(request: ReplaceAddressRequest) -> Self {
        AddressUpdate {
            label: request.label,
            line: request.line,
            city: request.city,
            district: request.district,
            subdistrict: request.subdistrict,
            state: request.state,
            is_main: request.is_main,
        }
    }
}

/// Replace Address Handler
///
/// Every field is required.
#[endpoint(
    tags("addresses"),
    summary = "Replace Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address replaced"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<ReplaceAddressRequest>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let address = state
        .app
        .addresses
        .replace_address(account, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use shoeclean_app::domain::addresses::{
        AddressesServiceError, MockAddressesService, records::AddressUuid,
    };

    use crate::test_helpers::{Mocks, make_address};

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        Mocks {
            addresses,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("addresses/{uuid}").put(handler))
    }

    #[tokio::test]
    async fn test_replace_requires_every_field() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses.expect_replace_address().never();

        let res = TestClient::put(format!("http://example.com/addresses/{}", Uuid::now_v7()))
            .json(&json!({ "label": "Office" }))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_address_returns_200() -> TestResult {
        let uuid = AddressUuid::new();
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_replace_address()
            .once()
            .withf(move |_, address, update| {
                *address == uuid && update.label == "Office" && update.is_main
            })
            .return_once(move |_, _, _| Ok(make_address(uuid)));

        let res = TestClient::put(format!("http://example.com/addresses/{uuid}"))
            .json(&json!({
                "label": "Office",
                "line": "Jl. Thamrin 9",
                "city": "Jakarta",
                "district": "Menteng",
                "subdistrict": "Gondangdia",
                "state": "DKI Jakarta",
                "is_main": true
            }))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_missing_address_returns_404() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_replace_address()
            .once()
            .return_once(|_, _, _| Err(AddressesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/addresses/{}", Uuid::now_v7()))
            .json(&json!({
                "label": "Office",
                "line": "Jl. Thamrin 9",
                "city": "Jakarta",
                "district": "Menteng",
                "subdistrict": "Gondangdia",
                "state": "DKI Jakarta",
                "is_main": false
            }))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
