//! Delete Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{addresses::errors::into_status_error, extensions::*, state::State};

/// Delete Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Delete Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Address deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
        (status_code = StatusCode::CONFLICT, description = "Address is used by an order"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    state
        .app
        .addresses
        .delete_address(account, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use shoeclean_app::domain::addresses::{
        AddressesServiceError, MockAddressesService, records::AddressUuid,
    };

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID};

    use super::*;

    fn make_service(addresses: MockAddressesService) -> Service {
        Mocks {
            addresses,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("addresses/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_address_returns_204() -> TestResult {
        let uuid = AddressUuid::new();
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_delete_address()
            .once()
            .withf(move |account, address| *account == TEST_ACCOUNT_UUID && *address == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/addresses/{uuid}"))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_address_in_use_returns_409() -> TestResult {
        let mut addresses = MockAddressesService::new();

        addresses
            .expect_delete_address()
            .once()
            .return_once(|_, _| Err(AddressesServiceError::InvalidReference));

        let res = TestClient::delete(format!("http://example.com/addresses/{}", Uuid::now_v7()))
            .send(&make_service(addresses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
