//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::decode_label,
    domain::notifications::records::{
        NotificationChannel, NotificationLogRecord, NotificationLogUuid, NotificationStatus,
    },
};

const CREATE_NOTIFICATION_LOG_SQL: &str = include_str!("sql/create_notification_log.sql");
const COMPLETE_NOTIFICATION_LOG_SQL: &str = include_str!("sql/complete_notification_log.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_log(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: NotificationLogUuid,
        channel: NotificationChannel,
        recipient: &str,
        subject: &str,
    ) -> Result<NotificationLogRecord, sqlx::Error> {
        query_as::<Postgres, NotificationLogRecord>(CREATE_NOTIFICATION_LOG_SQL)
            .bind(uuid.into_uuid())
            .bind(channel.as_str())
            .bind(recipient)
            .bind(subject)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn complete_log(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: NotificationLogUuid,
        status: NotificationStatus,
        failure_reason: Option<&str>,
    ) -> Result<NotificationLogRecord, sqlx::Error> {
        query_as::<Postgres, NotificationLogRecord>(COMPLETE_NOTIFICATION_LOG_SQL)
            .bind(uuid.into_uuid())
            .bind(status.as_str())
            .bind(failure_reason)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationLogRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationLogUuid::from_uuid(row.try_get("uuid")?),
            channel: decode_label(row, "channel")?,
            recipient: row.try_get("recipient")?,
            subject: row.try_get("subject")?,
            status: decode_label(row, "status")?,
            failure_reason: row.try_get("failure_reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

