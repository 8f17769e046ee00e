//! Shoeclean JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tokio::time;
use tracing::{error, info, warn};

use shoeclean_app::context::{AppContext, AppSettings};

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod accounts;
mod addresses;
mod auth;
mod catalogs;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod pagination;
mod router;
mod shutdown;
mod sneakers;
mod state;
#[cfg(test)]
mod test_helpers;
mod transactions;
mod vouchers;

/// Shoeclean JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let addr = config.bind_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let settings = AppSettings {
        jwt_secret: config.auth.jwt_secret.clone(),
        jwt_ttl: config.auth.jwt_ttl(),
        delivery_fee: config.pricing.delivery_fee,
        run_migrations: config.database.run_migrations,
        smtp: config.smtp.settings(),
    };

    let (app, worker) =
        match AppContext::from_database_url(&config.database.database_url, settings).await {
            Ok(initialized) => initialized,
            Err(init_error) => {
                error!("failed to initialize app context: {init_error}");
                observability.shutdown();

                process::exit(1);
            }
        };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::api_router());

    let doc = OpenApi::new("Shoeclean API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    // The worker drains queued events once the last publisher is dropped with the router.
    if time::timeout(shutdown::GRACE_PERIOD, worker).await.is_err() {
        warn!("event worker did not drain before the grace period elapsed");
    }

    observability.shutdown();
}
