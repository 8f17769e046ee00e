//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        addresses::{
            data::{AddressUpdate, NewAddress},
            records::{AddressRecord, AddressUuid},
        },
    },
    pagination::{PageRequest, row_total},
};

const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const COUNT_ADDRESSES_SQL: &str = include_str!("sql/count_addresses.sql");
const GET_ADDRESS_SQL: &str = include_str!("sql/get_address.sql");
const GET_MAIN_ADDRESS_SQL: &str = include_str!("sql/get_main_address.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("sql/update_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");
const CLEAR_MAIN_ADDRESS_SQL: &str = include_str!("sql/clear_main_address.sql");
const SET_MAIN_ADDRESS_SQL: &str = include_str!("sql/set_main_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_ADDRESSES_SQL)
            .bind(account.into_uuid())
            .bind(filter)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        filter: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ADDRESSES_SQL)
            .bind(account.into_uuid())
            .bind(filter)
            .fetch_one(&mut **tx)
            .await?;

        Ok(row_total(count))
    }

    pub(crate) async fn get_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_main_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Option<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(GET_MAIN_ADDRESS_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
        new: &NewAddress,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(account.into_uuid())
            .bind(new.label.trim())
            .bind(new.line.trim())
            .bind(new.city.trim())
            .bind(new.district.trim())
            .bind(new.subdistrict.trim())
            .bind(new.state.trim())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
        update: &AddressUpdate,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(UPDATE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(account.into_uuid())
            .bind(update.label.trim())
            .bind(update.line.trim())
            .bind(update.city.trim())
            .bind(update.district.trim())
            .bind(update.subdistrict.trim())
            .bind(update.state.trim())
            .bind(update.is_main)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Unset the main flag on every address of the account except `keep`.
    pub(crate) async fn clear_main_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        keep: AddressUuid,
    ) -> Result<(), sqlx::Error> {
        query(CLEAR_MAIN_ADDRESS_SQL)
            .bind(account.into_uuid())
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_main_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_MAIN_ADDRESS_SQL)
            .bind(address.into_uuid())
            .bind(account.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            label: row.try_get("label")?,
            line: row.try_get("line")?,
            city: row.try_get("city")?,
            district: row.try_get("district")?,
            subdistrict: row.try_get("subdistrict")?,
            state: row.try_get("state")?,
            is_main: row.try_get("is_main")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
