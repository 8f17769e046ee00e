//! Email delivery.

use std::fmt;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use mockall::automock;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::notifications::Email;

#[derive(Debug, Error)]
pub enum EmailSenderError {
    #[error("email delivery failed: {0}")]
    Delivery(String),

    #[error("invalid email address {address:?}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build email")]
    Message(#[source] lettre::error::Error),

    #[error("smtp transport error")]
    Smtp(#[source] lettre::transport::smtp::Error),
}

/// Mail server settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `Shoeclean <noreply@shoeclean.id>`.
    pub from: String,
    /// Upgrade the connection with STARTTLS; plain SMTP otherwise.
    pub starttls: bool,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("starttls", &self.starttls)
            .finish()
    }
}

/// Delivers emails through an SMTP relay.
#[derive(Clone)]
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl fmt::Debug for SmtpEmailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpEmailSender")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpEmailSender {
    /// Build a sender for `settings`. No connection is made until the first send.
    ///
    /// # Errors
    ///
    /// Returns an error when the sender address does not parse or the TLS
    /// parameters for `host` cannot be built.
    pub fn new(settings: SmtpSettings) -> Result<Self, EmailSenderError> {
        let from = parse_mailbox(&settings.from)?;

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(EmailSenderError::Smtp)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        let mut builder = builder.port(settings.port);

        if let Some(username) = settings.username {
            builder = builder.credentials(Credentials::new(
                username,
                settings.password.unwrap_or_default(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn message(&self, email: &Email) -> Result<Message, EmailSenderError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.recipient)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(EmailSenderError::Message)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailSenderError> {
    address
        .parse()
        .map_err(|source| EmailSenderError::Address {
            address: address.to_owned(),
            source,
        })
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &Email) -> Result<(), EmailSenderError> {
        let message = self.message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(EmailSenderError::Smtp)?;

        debug!(
            recipient = %email.recipient,
            code = %response.code(),
            "smtp relay accepted email"
        );

        Ok(())
    }
}

/// Logs outgoing emails instead of delivering them.
///
/// Only the envelope is logged. Bodies carry reset tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEmailSender;

#[async_trait]
impl EmailSender for TracingEmailSender {
    async fn send(&self, email: &Email) -> Result<(), EmailSenderError> {
        info!(
            recipient = %email.recipient,
            subject = %email.subject,
            body_len = email.body.len(),
            "email not delivered, no smtp relay configured"
        );

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a single email.
    async fn send(&self, email: &Email) -> Result<(), EmailSenderError>;
}
