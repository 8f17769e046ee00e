//! SMTP Config

use clap::{ArgAction, Args};

use shoeclean_app::domain::notifications::SmtpSettings;

/// Outgoing email settings.
#[derive(Debug, Args)]
pub struct SmtpConfig {
    /// SMTP relay host; emails are only logged when unset
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP login
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender mailbox for outgoing email
    #[arg(long, env = "SMTP_FROM", default_value = "Shoeclean <noreply@shoeclean.id>")]
    pub smtp_from: String,

    /// Upgrade the SMTP connection with STARTTLS
    #[arg(
        long,
        env = "SMTP_STARTTLS",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub smtp_starttls: bool,
}

impl SmtpConfig {
    /// Relay settings, or `None` when no host is configured.
    pub fn settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_ref()?;

        Some(SmtpSettings {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self.smtp_from.clone(),
            starttls: self.smtp_starttls,
        })
    }
}
