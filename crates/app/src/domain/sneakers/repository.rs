//! Sneakers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        sneakers::{
            data::NewSneaker,
            records::{SneakerRecord, SneakerUuid},
        },
    },
    pagination::{PageRequest, row_total},
};

const LIST_SNEAKERS_SQL: &str = include_str!("sql/list_sneakers.sql");
const COUNT_SNEAKERS_SQL: &str = include_str!("sql/count_sneakers.sql");
const GET_SNEAKER_SQL: &str = include_str!("sql/get_sneaker.sql");
const CREATE_SNEAKER_SQL: &str = include_str!("sql/create_sneaker.sql");
const UPDATE_SNEAKER_SQL: &str = include_str!("sql/update_sneaker.sql");
const DELETE_SNEAKER_SQL: &str = include_str!("sql/delete_sneaker.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSneakersRepository;

impl PgSneakersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<SneakerRecord>, sqlx::Error> {
        query_as::<Postgres, SneakerRecord>(LIST_SNEAKERS_SQL)
            .bind(account.into_uuid())
            .bind(filter)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        filter: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_SNEAKERS_SQL)
            .bind(account.into_uuid())
            .bind(filter)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row_total(count))
    }

    pub(crate) async fn get_sneaker(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<SneakerRecord, sqlx::Error> {
        query_as::<Postgres, SneakerRecord>(GET_SNEAKER_SQL)
            .bind(sneaker.into_uuid())
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_sneaker(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sneaker: SneakerUuid,
        new: &NewSneaker,
    ) -> Result<SneakerRecord, sqlx::Error> {
        query_as::<Postgres, SneakerRecord>(CREATE_SNEAKER_SQL)
            .bind(sneaker.into_uuid())
            .bind(account.into_uuid())
            .bind(new.brand.trim())
            .bind(new.color.trim())
            .bind(new.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_sneaker(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sneaker: SneakerUuid,
        update: &NewSneaker,
    ) -> Result<SneakerRecord, sqlx::Error> {
        query_as::<Postgres, SneakerRecord>(UPDATE_SNEAKER_SQL)
            .bind(sneaker.into_uuid())
            .bind(account.into_uuid())
            .bind(update.brand.trim())
            .bind(update.color.trim())
            .bind(update.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_sneaker(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SNEAKER_SQL)
            .bind(sneaker.into_uuid())
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for SneakerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SneakerUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            brand: row.try_get("brand")?,
            color: row.try_get("color")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
