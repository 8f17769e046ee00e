//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingConfig,
    server::ListenConfig,
    smtp::SmtpConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;
pub(crate) mod smtp;

/// Shoeclean JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "shoeclean-json", about = "Shoeclean JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listener address.
    #[command(flatten)]
    pub listen: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export and slow request settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Order pricing settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Outgoing email settings.
    #[command(flatten)]
    pub smtp: SmtpConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        self.listen.bind_addr()
    }
}
