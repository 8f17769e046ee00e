//! Patch Address Handler

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

use shoeclean_app::domain::addresses::data::AddressPatch;

use crate::{
    addresses::{errors::into_status_error, get::AddressResponse},
    extensions::*,
    state::State,
};

/// Patch Address Request
///
/// Absent fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PatchAddressRequest {
    pub label: Option<String>,
    pub line: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub state: Option<String>,
    pub is_main: Option<bool>,
}

impl From<PatchAddressRequest> for AddressPatch {
    fn from(request: PatchAddressRequest) -> Self {
        AddressPatch {
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

/// Patch Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Patch Address",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<PatchAddressRequest>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let address = state
        .app
        .addresses
        .patch_address(account, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(address.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shoeclean_app::domain::addresses::{MockAddressesService, records::AddressUuid};

    use crate::test_helpers::{Mocks, make_address};

    use super::*;

    #[tokio::test]
    async fn test_patch_forwards_only_present_fields() -> TestResult {
        let uuid = AddressUuid::new();
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_patch_address()
            .once()
            .withf(move |_, address, patch| {
                *address == uuid
                    && *patch
                        == AddressPatch {
                            city: Some("Bandung".to_owned()),
                            ..AddressPatch::default()
                        }
            })
            .return_once(move |_, _, _| {
                let mut address = make_address(uuid);
                address.city = "Bandung".to_owned();

                Ok(address)
            });

        let service = Mocks {
            addresses,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("addresses/{uuid}").patch(handler));

        let mut res = TestClient::patch(format!("http://example.com/addresses/{uuid}"))
            .json(&json!({ "city": "Bandung" }))
            .send(&service)
            .await;

        let body: AddressResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.city, "Bandung");
        assert_eq!(body.label, "Home");

        Ok(())
    }
}
