//! Transactions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use shoeclean::{
    pricing::OrderPricing,
    transactions::{TransactionMethod, TransactionStatus},
};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::decode_label,
    domain::{
        accounts::records::AccountUuid,
        orders::records::OrderUuid,
        transactions::records::{TransactionDetails, TransactionRecord, TransactionUuid},
    },
    pagination::{PageRequest, row_total},
};

const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const COUNT_TRANSACTIONS_SQL: &str = include_str!("sql/count_transactions.sql");
const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");

/// Resolved listing criteria.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransactionQuery<'a> {
    pub account: AccountUuid,
    pub usc_id: Option<&'a str>,
    pub created_from: Timestamp,
    pub created_to: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        criteria: TransactionQuery<'_>,
        page: PageRequest,
    ) -> Result<Vec<TransactionDetails>, sqlx::Error> {
        query_as::<Postgres, TransactionDetails>(LIST_TRANSACTIONS_SQL)
            .bind(criteria.account.into_uuid())
            .bind(criteria.usc_id)
            .bind(SqlxTimestamp::from(criteria.created_from))
            .bind(SqlxTimestamp::from(criteria.created_to))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        criteria: TransactionQuery<'_>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_TRANSACTIONS_SQL)
            .bind(criteria.account.into_uuid())
            .bind(criteria.usc_id)
            .bind(SqlxTimestamp::from(criteria.created_from))
            .bind(SqlxTimestamp::from(criteria.created_to))
            .fetch_one(&mut **tx)
            .await?;

        Ok(row_total(count))
    }

    /// Record the amount owed for a confirmed order as `UNPAID`.
    pub(crate) async fn create_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionUuid,
        order: OrderUuid,
        pricing: &OrderPricing,
        method: TransactionMethod,
    ) -> Result<TransactionRecord, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(CREATE_TRANSACTION_SQL)
            .bind(transaction.into_uuid())
            .bind(order.into_uuid())
            .bind(pricing.subtotal)
            .bind(pricing.discount)
            .bind(pricing.total_amount)
            .bind(TransactionStatus::default().as_str())
            .bind(method.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            total_amount: row.try_get("total_amount")?,
            deduction: row.try_get("deduction")?,
            final_amount: row.try_get("final_amount")?,
            status: decode_label(row, "status")?,
            method: decode_label(row, "method")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionDetails {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            usc_id: row.try_get("usc_id")?,
            service_type: decode_label(row, "service_type")?,
            subtotal: row.try_get("subtotal")?,
            discount: row.try_get("discount")?,
            total_amount: row.try_get("total_amount")?,
            method: decode_label(row, "method")?,
            status: decode_label(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
