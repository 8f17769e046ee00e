//! Versioned API routes

use salvo::Router;

use crate::{accounts, addresses, auth, catalogs, orders, sneakers, transactions, vouchers};

/// Every route under `/v1`.
///
/// Registration, login and password recovery are public. Everything else
/// runs behind the bearer token middleware, and `backoffice` additionally
/// requires `ROLE_ADMIN`.
pub(crate) fn api_router() -> Router {
    Router::with_path("v1")
        .push(public_auth_router())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/roles").get(auth::roles::handler))
                .push(Router::with_path("accounts/details").get(accounts::details::handler))
                .push(addresses_router())
                .push(Router::with_path("catalogs").get(catalogs::index::handler))
                .push(sneakers_router())
                .push(Router::with_path("vouchers/{code}").get(vouchers::get::handler))
                .push(orders_router())
                .push(Router::with_path("transactions").get(transactions::index::handler))
                .push(backoffice_router()),
        )
}

fn public_auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(Router::with_path("passwords/forgot").post(auth::passwords::forgot))
        .push(Router::with_path("passwords/reset").post(auth::passwords::reset))
}

fn addresses_router() -> Router {
    Router::with_path("addresses")
        .get(addresses::index::handler)
        .post(addresses::create::handler)
        .push(Router::with_path("main/{uuid}").post(addresses::main::handler))
        .push(
            Router::with_path("{uuid}")
                .get(addresses::get::handler)
                .put(addresses::replace::handler)
                .patch(addresses::patch::handler)
                .delete(addresses::delete::handler),
        )
}

fn sneakers_router() -> Router {
    Router::with_path("sneakers")
        .get(sneakers::index::handler)
        .post(sneakers::create::handler)
        .push(
            Router::with_path("{uuid}")
                .get(sneakers::get::handler)
                .put(sneakers::replace::handler)
                .patch(sneakers::patch::handler)
                .delete(sneakers::delete::handler),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .post(orders::create::handler)
        .push(Router::with_path("confirm/{usc_id}").post(orders::confirm::handler))
        .push(
            Router::with_path("{usc_id}")
                .get(orders::get::handler)
                .push(Router::with_path("{voucher_code}").get(orders::preview::handler)),
        )
}

fn backoffice_router() -> Router {
    Router::with_path("backoffice")
        .hoop(auth::middleware::require_admin)
        .push(Router::with_path("catalogs").put(catalogs::upsert::handler))
        .push(Router::with_path("vouchers").post(vouchers::create::handler))
}
