//! Vouchers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::decode_label,
    domain::vouchers::{
        data::NewVoucher,
        records::{VoucherRecord, VoucherUuid},
    },
};

const GET_VOUCHER_SQL: &str = include_str!("sql/get_voucher.sql");
const GET_VOUCHER_BY_CODE_SQL: &str = include_str!("sql/get_voucher_by_code.sql");
const CREATE_VOUCHER_SQL: &str = include_str!("sql/create_voucher.sql");
const CONSUME_VOUCHER_SQL: &str = include_str!("sql/consume_voucher.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVouchersRepository;

impl PgVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(GET_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_voucher_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(GET_VOUCHER_BY_CODE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
        new: &NewVoucher,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(CREATE_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .bind(&new.code)
            .bind(new.voucher_type.as_str())
            .bind(new.amount_type.as_str())
            .bind(new.amount)
            .bind(new.quantity)
            .bind(SqlxTimestamp::from(new.expired_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Take one redemption. Returns `false` when none remain or the voucher expired.
    pub(crate) async fn consume_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(CONSUME_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for VoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VoucherUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            voucher_type: decode_label(row, "voucher_type")?,
            amount_type: decode_label(row, "amount_type")?,
            amount: row.try_get("amount")?,
            quantity: row.try_get("quantity")?,
            expired_at: row.try_get::<SqlxTimestamp, _>("expired_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
