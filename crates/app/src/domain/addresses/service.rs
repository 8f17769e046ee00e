//! Addresses service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        addresses::{
            AddressesServiceError,
            data::{AddressPatch, AddressUpdate, NewAddress},
            records::{AddressRecord, AddressUuid},
            repository::PgAddressesRepository,
        },
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }

    async fn save(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError> {
        if let Some(field) = update.blank_field() {
            return Err(AddressesServiceError::BlankField(field));
        }

        if update.is_main {
            self.repository
                .clear_main_address(tx, account, address)
                .await?;
        }

        Ok(self
            .repository
            .update_address(tx, account, address, &update)
            .await?)
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    #[tracing::instrument(
        name = "addresses.service.list_addresses",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn list_addresses(
        &self,
        account: AccountUuid,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<AddressRecord>, AddressesServiceError> {
        let filter = filter.as_deref().map(str::trim).filter(|f| !f.is_empty());

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_addresses(&mut tx, account, filter, page)
            .await?;

        let total = self
            .repository
            .count_addresses(&mut tx, account, filter)
            .await?;

        tx.commit().await?;

        Ok(Page::new(items, page, total))
    }

    #[tracing::instrument(
        name = "addresses.service.get_address",
        skip(self),
        fields(account_uuid = %account, address_uuid = %address),
        err
    )]
    async fn get_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_address(&mut tx, account, address).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "addresses.service.create_address",
        skip(self, address),
        fields(account_uuid = %account, address_uuid = tracing::field::Empty),
        err
    )]
    async fn create_address(
        &self,
        account: AccountUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        if let Some(field) = address.blank_field() {
            return Err(AddressesServiceError::BlankField(field));
        }

        let uuid = AddressUuid::new();

        tracing::Span::current().record("address_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_address(&mut tx, account, uuid, &address)
            .await?;

        tx.commit().await?;

        info!(address_uuid = %record.uuid, "created address");

        Ok(record)
    }

    #[tracing::instrument(
        name = "addresses.service.replace_address",
        skip(self, update),
        fields(account_uuid = %account, address_uuid = %address),
        err
    )]
    async fn replace_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.save(&mut tx, account, address, update).await?;

        tx.commit().await?;

        info!(address_uuid = %record.uuid, "replaced address");

        Ok(record)
    }

    #[tracing::instrument(
        name = "addresses.service.patch_address",
        skip(self, patch),
        fields(account_uuid = %account, address_uuid = %address),
        err
    )]
    async fn patch_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
        patch: AddressPatch,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_address(&mut tx, account, address).await?;

        let record = self
            .save(&mut tx, account, address, patch.apply(&current))
            .await?;

        tx.commit().await?;

        info!(address_uuid = %record.uuid, "patched address");

        Ok(record)
    }

    #[tracing::instrument(
        name = "addresses.service.delete_address",
        skip(self),
        fields(account_uuid = %account, address_uuid = %address),
        err
    )]
    async fn delete_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_address(&mut tx, account, address)
            .await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(address_uuid = %address, "deleted address");

        Ok(())
    }

    #[tracing::instrument(
        name = "addresses.service.set_main_address",
        skip(self),
        fields(account_uuid = %account, address_uuid = %address),
        err
    )]
    async fn set_main_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .clear_main_address(&mut tx, account, address)
            .await?;

        let rows_affected = self
            .repository
            .set_main_address(&mut tx, account, address)
            .await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(address_uuid = %address, "set main address");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// A page of the account's addresses, sorted by label, optionally filtered.
    async fn list_addresses(
        &self,
        account: AccountUuid,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<AddressRecord>, AddressesServiceError>;

    /// Retrieve a single address owned by the account.
    async fn get_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Create an address for the account.
    async fn create_address(
        &self,
        account: AccountUuid,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Replace every field of an address.
    async fn replace_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Update only the fields present in the patch.
    async fn patch_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
        patch: AddressPatch,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Delete an address.
    async fn delete_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError>;

    /// Make an address the account's main address.
    async fn set_main_address(
        &self,
        account: AccountUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError>;
}
