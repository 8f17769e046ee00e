//! Notifications

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod sender;
pub mod service;

pub use data::Email;
pub use errors::NotificationsServiceError;
pub use sender::{
    EmailSender, EmailSenderError, SmtpEmailSender, SmtpSettings, TracingEmailSender,
};
pub use service::*;
