//! Notifications service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::notifications::{
        Email, EmailSender, NotificationsServiceError,
        records::{NotificationChannel, NotificationLogRecord, NotificationLogUuid, NotificationStatus},
        repository::PgNotificationsRepository,
    },
};

#[derive(Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
    sender: Arc<dyn EmailSender>,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
            sender,
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    #[tracing::instrument(
        name = "notifications.service.send_email",
        skip(self, email),
        fields(notification_uuid = tracing::field::Empty, status = tracing::field::Empty),
        err
    )]
    async fn send_email(
        &self,
        email: Email,
    ) -> Result<NotificationLogRecord, NotificationsServiceError> {
        let uuid = NotificationLogUuid::new();
        let span = Span::current();

        span.record("notification_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        self.repository
            .create_log(
                &mut tx,
                uuid,
                NotificationChannel::Email,
                &email.recipient,
                &email.subject,
            )
            .await?;

        tx.commit().await?;

        let outcome = self.sender.send(&email).await;

        let (status, failure_reason) = match &outcome {
            Ok(()) => (NotificationStatus::Success, None),
            Err(error) => {
                warn!(%error, "email delivery failed");

                (NotificationStatus::Failed, Some(error.to_string()))
            }
        };

        span.record("status", tracing::field::display(status));

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .complete_log(&mut tx, uuid, status, failure_reason.as_deref())
            .await?;

        tx.commit().await?;

        info!(notification_uuid = %uuid, status = %status, "sent notification");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Log, deliver and record the outcome of an email.
    async fn send_email(
        &self,
        email: Email,
    ) -> Result<NotificationLogRecord, NotificationsServiceError>;
}
