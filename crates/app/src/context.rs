//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, JwtManager, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        addresses::{AddressesService, PgAddressesService},
        catalogs::{CatalogsService, PgCatalogsService},
        notifications::{
            EmailSender, EmailSenderError, NotificationsService, PgNotificationsService,
            SmtpEmailSender, SmtpSettings, TracingEmailSender,
        },
        orders::{OrdersService, PgOrdersService},
        sneakers::{PgSneakersService, SneakersService},
        transactions::{PgTransactionsService, TransactionsService},
        vouchers::{PgVouchersService, VouchersService},
    },
    events::{EventBus, EventWorker},
};

/// Capacity of the in-memory event channel.
pub const EVENT_BUFFER: usize = 256;

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("delivery fee cannot be negative")]
    NegativeDeliveryFee,

    #[error("invalid smtp settings")]
    Email(#[source] EmailSenderError),
}

/// Settings that shape the services rather than the transport.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub jwt_secret: String,
    pub jwt_ttl: SignedDuration,
    pub delivery_fee: Decimal,
    pub run_migrations: bool,
    /// Relay for outgoing email; emails are only logged without one.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountsService>,
    pub addresses: Arc<dyn AddressesService>,
    pub catalogs: Arc<dyn CatalogsService>,
    pub sneakers: Arc<dyn SneakersService>,
    pub vouchers: Arc<dyn VouchersService>,
    pub orders: Arc<dyn OrdersService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Spawns the [`EventWorker`] on the current runtime. The worker stops once
    /// the context and every clone of it have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        settings: AppSettings,
    ) -> Result<(Self, JoinHandle<()>), AppInitError> {
        if settings.delivery_fee < Decimal::ZERO {
            return Err(AppInitError::NegativeDeliveryFee);
        }

        let sender = email_sender(settings.smtp).map_err(AppInitError::Email)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool);

        let (events, receiver) = EventBus::channel(EVENT_BUFFER);

        let notifications: Arc<dyn NotificationsService> = Arc::new(PgNotificationsService::new(
            db.clone(),
            sender,
        ));

        let worker = tokio::spawn(EventWorker::new(receiver, Arc::clone(&notifications)).run());

        let jwt = JwtManager::new(settings.jwt_secret, settings.jwt_ttl);

        let context = Self {
            auth: Arc::new(PgAuthService::new(db.clone(), jwt, events)),
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            addresses: Arc::new(PgAddressesService::new(db.clone())),
            catalogs: Arc::new(PgCatalogsService::new(db.clone())),
            sneakers: Arc::new(PgSneakersService::new(db.clone())),
            vouchers: Arc::new(PgVouchersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), settings.delivery_fee)),
            transactions: Arc::new(PgTransactionsService::new(db)),
            notifications,
        };

        Ok((context, worker))
    }
}

fn email_sender(smtp: Option<SmtpSettings>) -> Result<Arc<dyn EmailSender>, EmailSenderError> {
    match smtp {
        Some(settings) => {
            info!(host = %settings.host, port = settings.port, "delivering email over smtp");

            Ok(Arc::new(SmtpEmailSender::new(settings)?))
        }
        None => {
            warn!("no smtp relay configured, outgoing email is only logged");

            Ok(Arc::new(TracingEmailSender))
        }
    }
}
