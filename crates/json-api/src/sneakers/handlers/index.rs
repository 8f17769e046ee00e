//! Sneaker Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{self, DEFAULT_PAGE_SIZE, PageMeta},
    sneakers::{errors::into_status_error, get::SneakerResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersResponse {
    /// Sneakers on this page, newest first
    pub sneakers: Vec<SneakerResponse>,

    pub page: PageMeta,
}

/// Sneaker Index Handler
///
/// Lists the caller's sneakers. `filter` matches brand or colour.
#[endpoint(
    tags("sneakers"),
    summary = "List Sneakers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filter: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<SneakersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let sneakers = state
        .app
        .sneakers
        .list_sneakers(
            account,
            pagination::filter(filter),
            pagination::page_request(page, size, DEFAULT_PAGE_SIZE),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(SneakersResponse {
        page: PageMeta::from(&sneakers),
        sneakers: sneakers.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shoeclean_app::{
        domain::sneakers::{MockSneakersService, records::SneakerUuid},
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID, make_sneaker};

    use super::*;

    #[tokio::test]
    async fn test_index_forwards_filter_and_paging() -> TestResult {
        let mut sneakers = MockSneakersService::new();

        sneakers
            .expect_list_sneakers()
            .once()
            .withf(|account, filter, page| {
                *account == TEST_ACCOUNT_UUID
                    && filter.as_deref() == Some("nike")
                    && *page == PageRequest::new(1, 2)
            })
            .return_once(|_, _, page| {
                Ok(Page::new(
                    vec![make_sneaker(SneakerUuid::new()), make_sneaker(SneakerUuid::new())],
                    page,
                    5,
                ))
            });

        let service = Mocks {
            sneakers,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("sneakers").get(handler));

        let mut res = TestClient::get("http://example.com/sneakers?filter=nike&page=1&size=2")
            .send(&service)
            .await;

        let body: SneakersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.sneakers.len(), 2);
        assert_eq!(body.page.number, 1);
        assert_eq!(body.page.total_pages, 3);

        Ok(())
    }
}
