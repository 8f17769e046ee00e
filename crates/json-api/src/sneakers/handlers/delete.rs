//! Delete Sneaker Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, sneakers::errors::into_status_error, state::State};

/// Delete Sneaker Handler
#[endpoint(
    tags("sneakers"),
    summary = "Delete Sneaker",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Sneaker deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Sneaker not found"),
        (status_code = StatusCode::CONFLICT, description = "Sneaker is part of an order"),
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
        .sneakers
        .delete_sneaker(account, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use shoeclean_app::domain::sneakers::{
        MockSneakersService, SneakersServiceError, records::SneakerUuid,
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(sneakers: MockSneakersService) -> Service {
        Mocks {
            sneakers,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("sneakers/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_204() -> TestResult {
        let uuid = SneakerUuid::new();
        let mut sneakers = MockSneakersService::new();

        sneakers
            .expect_delete_sneaker()
            .once()
            .withf(move |_, sneaker| *sneaker == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/sneakers/{uuid}"))
            .send(&make_service(sneakers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_sneaker_in_order_returns_409() -> TestResult {
        let mut sneakers = MockSneakersService::new();

        sneakers
            .expect_delete_sneaker()
            .once()
            .return_once(|_, _| Err(SneakersServiceError::InvalidReference));

        let res = TestClient::delete(format!("http://example.com/sneakers/{}", Uuid::now_v7()))
            .send(&make_service(sneakers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
