//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use shoeclean_app::{auth::Principal, domain::accounts::records::AccountUuid};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<&Principal, StatusError>;

    fn account_or_401(&self) -> Result<AccountUuid, StatusError> {
        self.principal_or_401().map(|principal| principal.account)
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.obtain::<Principal>()
            .map_err(|_missing| StatusError::unauthorized().brief("Authentication required"))
    }
}
