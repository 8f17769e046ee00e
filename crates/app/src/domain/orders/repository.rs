//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use shoeclean::orders::OrderStatus;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::decode_label,
    domain::{
        accounts::records::AccountUuid,
        addresses::records::AddressUuid,
        catalogs::records::CatalogUuid,
        orders::records::{OrderRecord, OrderUuid},
        sneakers::records::SneakerUuid,
        vouchers::records::VoucherUuid,
    },
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CONFIRM_ORDER_SQL: &str = include_str!("sql/confirm_order.sql");
const LINK_SNEAKERS_SQL: &str = include_str!("sql/link_sneakers.sql");
const LIST_ORDER_SNEAKERS_SQL: &str = include_str!("sql/list_order_sneakers.sql");

/// Values for a new order row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub usc_id: &'a str,
    pub account: AccountUuid,
    pub address: AddressUuid,
    pub catalog: CatalogUuid,
    pub total_pairs: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(usc_id)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Like [`Self::get_order`] but holds a row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        usc_id: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(usc_id)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert an order awaiting confirmation. Returns `None` if the USC ID is taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderInsert<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let total_pairs =
            i32::try_from(order.total_pairs).map_err(|error| sqlx::Error::Encode(Box::new(error)))?;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.usc_id)
            .bind(order.account.into_uuid())
            .bind(order.address.into_uuid())
            .bind(order.catalog.into_uuid())
            .bind(OrderStatus::PendingConfirmation.as_str())
            .bind(total_pairs)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn confirm_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        voucher: Option<VoucherUuid>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CONFIRM_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(OrderStatus::Pending.as_str())
            .bind(voucher.map(VoucherUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Attach the account's own sneakers to an order. Returns how many were linked.
    pub(crate) async fn link_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        account: AccountUuid,
        sneakers: &[SneakerUuid],
    ) -> Result<u64, sqlx::Error> {
        let sneakers: Vec<Uuid> = sneakers.iter().copied().map(SneakerUuid::into_uuid).collect();

        let rows_affected = query(LINK_SNEAKERS_SQL)
            .bind(order.into_uuid())
            .bind(&sneakers)
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_order_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<SneakerUuid>, sqlx::Error> {
        let sneakers: Vec<Uuid> = query_scalar(LIST_ORDER_SNEAKERS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(sneakers.into_iter().map(SneakerUuid::from_uuid).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let total_pairs: i32 = row.try_get("total_pairs")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            usc_id: row.try_get("usc_id")?,
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            address_uuid: AddressUuid::from_uuid(row.try_get("address_uuid")?),
            catalog_uuid: CatalogUuid::from_uuid(row.try_get("catalog_uuid")?),
            voucher_uuid: row
                .try_get::<Option<Uuid>, _>("voucher_uuid")?
                .map(VoucherUuid::from_uuid),
            status: decode_label(row, "status")?,
            total_pairs: u32::try_from(total_pairs).map_err(|error| sqlx::Error::ColumnDecode {
                index: "total_pairs".to_string(),
                source: Box::new(error),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
