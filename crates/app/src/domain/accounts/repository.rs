//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    auth::UserUuid,
    domain::accounts::records::{AccountDetails, AccountRecord, AccountUuid},
};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const GET_ACCOUNT_BY_USER_SQL: &str = include_str!("sql/get_account_by_user.sql");
const GET_ACCOUNT_PROFILE_SQL: &str = include_str!("sql/get_account_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        user: UserUuid,
        name: Option<&str>,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .bind(user.into_uuid())
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_account_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(GET_ACCOUNT_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Account profile without the main address.
    pub(crate) async fn get_account_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<AccountDetails, sqlx::Error> {
        let row = query_as::<Postgres, AccountProfileRow>(GET_ACCOUNT_PROFILE_SQL)
            .bind(account.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(row.0)
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            profile_picture_url: row.try_get("profile_picture_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

struct AccountProfileRow(AccountDetails);

impl<'r> FromRow<'r, PgRow> for AccountProfileRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(AccountDetails {
            account: AccountUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            mobile: row.try_get("mobile")?,
            profile_picture_url: row.try_get("profile_picture_url")?,
            is_email_verified: row.try_get("is_email_verified")?,
            main_address: None,
        }))
    }
}
