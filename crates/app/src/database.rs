//! Database connection management

use std::{error::Error as StdError, str::FromStr};

use sqlx::{
    PgPool, Postgres, Row, Transaction,
    error::ErrorKind,
    migrate::MigrateError,
    postgres::PgRow,
};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction. Every service operation runs inside exactly one.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Decode a `TEXT` enumeration column through its `FromStr` implementation.
pub(crate) fn decode_label<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let label: String = row.try_get(column)?;

    label.parse().map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// The constraint a failed statement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    /// The query expected a row and got none.
    Missing,
    Duplicate,
    DanglingReference,
    NullColumn,
    /// A CHECK constraint or a numeric column range rejected a value.
    CheckRejected,
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Classify `error` by the constraint behind it; `None` for anything else.
pub(crate) fn classify(error: &sqlx::Error) -> Option<Failure> {
    if matches!(error, sqlx::Error::RowNotFound) {
        return Some(Failure::Missing);
    }

    let database_error = error.as_database_error()?;

    if database_error.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
        return Some(Failure::CheckRejected);
    }

    match database_error.kind() {
        ErrorKind::UniqueViolation => Some(Failure::Duplicate),
        ErrorKind::ForeignKeyViolation => Some(Failure::DanglingReference),
        ErrorKind::NotNullViolation => Some(Failure::NullColumn),
        ErrorKind::CheckViolation => Some(Failure::CheckRejected),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_are_classified() {
        assert_eq!(classify(&sqlx::Error::RowNotFound), Some(Failure::Missing));
    }

    #[test]
    fn connection_failures_are_not_classified() {
        assert_eq!(classify(&sqlx::Error::PoolTimedOut), None);
        assert_eq!(classify(&sqlx::Error::PoolClosed), None);
    }
}
