//! Transactions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        transactions::{
            TransactionsServiceError,
            data::TransactionFilter,
            records::TransactionDetails,
            repository::{PgTransactionsRepository, TransactionQuery},
        },
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    #[tracing::instrument(
        name = "transactions.service.list_transactions",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn list_transactions(
        &self,
        account: AccountUuid,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<TransactionDetails>, TransactionsServiceError> {
        let (created_from, created_to) = filter.window(Timestamp::now());

        if created_from > created_to {
            return Err(TransactionsServiceError::InvalidDateRange);
        }

        let criteria = TransactionQuery {
            account,
            usc_id: filter
                .usc_id
                .as_deref()
                .map(str::trim)
                .filter(|usc_id| !usc_id.is_empty()),
            created_from,
            created_to,
        };

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_transactions(&mut tx, criteria, page)
            .await?;

        let total = self.repository.count_transactions(&mut tx, criteria).await?;

        tx.commit().await?;

        Ok(Page::new(items, page, total))
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// A page of the account's transactions, newest first.
    async fn list_transactions(
        &self,
        account: AccountUuid,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<Page<TransactionDetails>, TransactionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use shoeclean::{
        catalog::ServiceType,
        transactions::{TransactionMethod, TransactionStatus},
    };
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn lists_confirmed_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        ctx.set_catalog(ServiceType::DeepCleaning, Decimal::from(15000))
            .await?;

        let first = ctx.confirmed_order(&customer, 2).await?;
        let second = ctx.confirmed_order(&customer, 1).await?;

        let page = ctx
            .transactions
            .list_transactions(
                customer.account,
                TransactionFilter::default(),
                PageRequest::new(0, 10),
            )
            .await?;

        let usc_ids: Vec<&str> = page.items.iter().map(|t| t.usc_id.as_str()).collect();

        assert_eq!(usc_ids, vec![second.as_str(), first.as_str()]);
        assert_eq!(page.total, 2);

        let oldest = &page.items[1];

        assert_eq!(oldest.service_type, ServiceType::DeepCleaning);
        assert_eq!(oldest.subtotal, Decimal::from(30000));
        assert_eq!(oldest.discount, Decimal::ZERO);
        assert_eq!(oldest.total_amount, Decimal::from(30000));
        assert_eq!(oldest.status, TransactionStatus::Unpaid);
        assert_eq!(oldest.method, TransactionMethod::CashOnDelivery);

        Ok(())
    }

    #[tokio::test]
    async fn filters_by_usc_id_and_window() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        ctx.set_catalog(ServiceType::RapidCleaning, Decimal::from(10000))
            .await?;

        let usc_id = ctx.confirmed_order(&customer, 1).await?;
        ctx.confirmed_order(&customer, 1).await?;

        let by_id = ctx
            .transactions
            .list_transactions(
                customer.account,
                TransactionFilter {
                    usc_id: Some(usc_id.to_lowercase()),
                    ..TransactionFilter::default()
                },
                PageRequest::new(0, 10),
            )
            .await?;

        assert_eq!(by_id.total, 1);
        assert_eq!(by_id.items[0].usc_id, usc_id);

        let future = ctx
            .transactions
            .list_transactions(
                customer.account,
                TransactionFilter {
                    created_from: Some(Timestamp::now() + SignedDuration::from_hours(1)),
                    created_to: Some(Timestamp::now() + SignedDuration::from_hours(2)),
                    ..TransactionFilter::default()
                },
                PageRequest::new(0, 10),
            )
            .await?;

        assert_eq!(future.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn other_accounts_transactions_are_hidden() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.register("owner@example.com").await?;
        let other = ctx.register("other@example.com").await?;

        ctx.set_catalog(ServiceType::Repair, Decimal::from(50000))
            .await?;
        ctx.confirmed_order(&owner, 1).await?;

        let page = ctx
            .transactions
            .list_transactions(
                other.account,
                TransactionFilter::default(),
                PageRequest::new(0, 10),
            )
            .await?;

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .transactions
            .list_transactions(
                AccountUuid::new(),
                TransactionFilter {
                    created_from: Some(Timestamp::now()),
                    created_to: Some(Timestamp::UNIX_EPOCH),
                    ..TransactionFilter::default()
                },
                PageRequest::new(0, 5),
            )
            .await;

        assert!(matches!(
            result,
            Err(TransactionsServiceError::InvalidDateRange)
        ));
    }
}
