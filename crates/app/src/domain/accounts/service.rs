//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::{
            AccountsServiceError,
            records::{AccountDetails, AccountUuid},
            repository::PgAccountsRepository,
        },
        addresses::repository::PgAddressesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    accounts: PgAccountsRepository,
    addresses: PgAddressesRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            accounts: PgAccountsRepository::new(),
            addresses: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    #[tracing::instrument(
        name = "accounts.service.get_account_details",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn get_account_details(
        &self,
        account: AccountUuid,
    ) -> Result<AccountDetails, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut details = self.accounts.get_account_profile(&mut tx, account).await?;

        details.main_address = self.addresses.get_main_address(&mut tx, account).await?;

        tx.commit().await?;

        Ok(details)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Profile, email verification state and main address of an account.
    async fn get_account_details(
        &self,
        account: AccountUuid,
    ) -> Result<AccountDetails, AccountsServiceError>;
}
