//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use uuid::Uuid;

use crate::auth::{RoleName, UserAttributes, UserRecord, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const SET_TOKEN_UID_SQL: &str = include_str!("sql/set_token_uid.sql");
const RESET_PASSWORD_SQL: &str = include_str!("sql/reset_password.sql");
const ENSURE_ROLE_SQL: &str = include_str!("sql/ensure_role.sql");
const GRANT_ROLE_SQL: &str = include_str!("sql/grant_role.sql");
const LIST_ROLES_SQL: &str = include_str!("sql/list_roles.sql");

/// Fields of a user row about to be inserted.
pub(crate) struct UserInsert<'a> {
    pub(crate) uuid: UserUuid,
    pub(crate) email: &'a str,
    pub(crate) password_hash: &'a str,
    pub(crate) mobile: Option<&'a str>,
    pub(crate) attributes: &'a UserAttributes,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserInsert<'_>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.mobile)
            .bind(Json(user.attributes))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_token_uid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        token_uid: &str,
    ) -> Result<(), sqlx::Error> {
        query(SET_TOKEN_UID_SQL)
            .bind(user.into_uuid())
            .bind(token_uid)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Replace the password of the user holding `token_uid` and clear the token.
    pub(crate) async fn reset_password(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uid: &str,
        password_hash: &str,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let user: Option<Uuid> = query_scalar(RESET_PASSWORD_SQL)
            .bind(token_uid)
            .bind(password_hash)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(user.map(UserUuid::from_uuid))
    }

    /// Grant a role, creating it first when it does not exist.
    pub(crate) async fn grant_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: RoleName,
    ) -> Result<(), sqlx::Error> {
        let role_uuid: Uuid = query_scalar(ENSURE_ROLE_SQL)
            .bind(Uuid::now_v7())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await?;

        query(GRANT_ROLE_SQL)
            .bind(user.into_uuid())
            .bind(role_uuid)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_roles(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<RoleName>, sqlx::Error> {
        let names: Vec<String> = query_scalar(LIST_ROLES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        // Roles outside the known set are ignored.
        Ok(names.iter().filter_map(|name| name.parse().ok()).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(attributes) = row.try_get::<Json<UserAttributes>, _>("attributes")?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            mobile: row.try_get("mobile")?,
            attributes,
            token_uid: row.try_get("token_uid")?,
            email_verified_at: row
                .try_get::<Option<SqlxTimestamp>, _>("email_verified_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
