//! Transaction Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shoeclean_app::domain::transactions::{
    data::{DEFAULT_PAGE_SIZE, TransactionFilter},
    records::TransactionDetails,
};

use crate::{
    extensions::*,
    pagination::{self, PageMeta},
    state::State,
    transactions::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub uuid: Uuid,
    pub usc_id: String,
    pub service_type: String,
    pub subtotal: String,
    pub discount: String,
    pub total_amount: String,
    pub method: String,
    pub status: String,
    pub created_at: String,
}

impl From<TransactionDetails> for TransactionResponse {
    fn from(transaction: TransactionDetails) -> Self {
        Self {
            uuid: transaction.uuid.into(),
            usc_id: transaction.usc_id,
            service_type: transaction.service_type.to_string(),
            subtotal: transaction.subtotal.to_string(),
            discount: transaction.discount.to_string(),
            total_amount: transaction.total_amount.to_string(),
            method: transaction.method.to_string(),
            status: transaction.status.to_string(),
            created_at: transaction.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    /// Transactions on this page, newest first
    pub transactions: Vec<TransactionResponse>,

    pub page: PageMeta,
}

/// Transaction Index Handler
///
/// Lists the caller's transactions. `filter` matches the USC ID; the creation
/// window defaults to everything up to now.
#[endpoint(
    tags("transactions"),
    summary = "List Transactions",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    filter: QueryParam<String, false>,
    created_at_from: QueryParam<String, false>,
    created_at_to: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let transaction_filter = TransactionFilter {
        usc_id: pagination::filter(filter),
        created_from: created_at_from.into_timestamp("created_at_from")?,
        created_to: created_at_to.into_timestamp("created_at_to")?,
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?;

    let transactions = state
        .app
        .transactions
        .list_transactions(
            account,
            transaction_filter,
            pagination::page_request(page, size, DEFAULT_PAGE_SIZE),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(TransactionsResponse {
        page: PageMeta::from(&transactions),
        transactions: transactions.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shoeclean::{
        catalog::ServiceType,
        transactions::{TransactionMethod, TransactionStatus},
    };
    use shoeclean_app::{
        domain::transactions::{
            MockTransactionsService, TransactionsServiceError, records::TransactionUuid,
        },
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{Mocks, TEST_ACCOUNT_UUID};

    use super::*;

    fn make_service(transactions: MockTransactionsService) -> Service {
        Mocks {
            transactions,
            ..Mocks::default()
        }
        .customer_service(Router::with_path("transactions").get(handler))
    }

    fn make_details(usc_id: &str) -> TransactionDetails {
        TransactionDetails {
            uuid: TransactionUuid::new(),
            usc_id: usc_id.to_owned(),
            service_type: ServiceType::RapidCleaning,
            subtotal: Decimal::new(3_000_000, 2),
            discount: Decimal::new(1_000_000, 2),
            total_amount: Decimal::new(2_000_000, 2),
            method: TransactionMethod::CashOnDelivery,
            status: TransactionStatus::Unpaid,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_index_uses_transaction_page_size() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .withf(|account, filter, page| {
                *account == TEST_ACCOUNT_UUID
                    && *filter == TransactionFilter::default()
                    && *page == PageRequest::new(0, DEFAULT_PAGE_SIZE)
            })
            .return_once(|_, _, page| Ok(Page::new(vec![make_details("USCID-24300007")], page, 1)));

        let mut res = TestClient::get("http://example.com/transactions")
            .send(&make_service(transactions))
            .await;

        let body: TransactionsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.page.size, 5);
        assert_eq!(body.transactions[0].total_amount, "20000.00");
        assert_eq!(body.transactions[0].method, "CASH_ON_DELIVERY");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_parses_window() -> TestResult {
        let from: Timestamp = "2024-10-01T00:00:00Z".parse()?;
        let to: Timestamp = "2024-10-31T00:00:00Z".parse()?;
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .withf(move |_, filter, _| {
                filter.usc_id.as_deref() == Some("USCID-243")
                    && filter.created_from == Some(from)
                    && filter.created_to == Some(to)
            })
            .return_once(|_, _, page| Ok(Page::new(vec![], page, 0)));

        let res = TestClient::get(
            "http://example.com/transactions?filter=USCID-243\
             &created_at_from=2024-10-01T00:00:00Z&created_at_to=2024-10-31T00:00:00Z",
        )
        .send(&make_service(transactions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_timestamp_returns_400() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions.expect_list_transactions().never();

        let res = TestClient::get("http://example.com/transactions?created_at_from=yesterday")
            .send(&make_service(transactions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_window_returns_400() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .return_once(|_, _, _| Err(TransactionsServiceError::InvalidDateRange));

        let res = TestClient::get(
            "http://example.com/transactions\
             ?created_at_from=2024-10-31T00:00:00Z&created_at_to=2024-10-01T00:00:00Z",
        )
        .send(&make_service(transactions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
