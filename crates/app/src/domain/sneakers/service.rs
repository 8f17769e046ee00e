//! Sneakers service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        sneakers::{
            SneakersServiceError,
            data::{NewSneaker, SneakerPatch},
            records::{SneakerRecord, SneakerUuid},
            repository::PgSneakersRepository,
        },
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgSneakersService {
    db: Db,
    repository: PgSneakersRepository,
}

impl PgSneakersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSneakersRepository::new(),
        }
    }
}

#[async_trait]
impl SneakersService for PgSneakersService {
    #[tracing::instrument(
        name = "sneakers.service.list_sneakers",
        skip(self),
        fields(account_uuid = %account),
        err
    )]
    async fn list_sneakers(
        &self,
        account: AccountUuid,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<SneakerRecord>, SneakersServiceError> {
        let filter = filter.as_deref().map(str::trim).filter(|f| !f.is_empty());

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_sneakers(&mut tx, account, filter, page)
            .await?;

        let total = self
            .repository
            .count_sneakers(&mut tx, account, filter)
            .await?;

        tx.commit().await?;

        Ok(Page::new(items, page, total))
    }

    #[tracing::instrument(
        name = "sneakers.service.get_sneaker",
        skip(self),
        fields(account_uuid = %account, sneaker_uuid = %sneaker),
        err
    )]
    async fn get_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<SneakerRecord, SneakersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_sneaker(&mut tx, account, sneaker).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "sneakers.service.create_sneaker",
        skip(self, sneaker),
        fields(account_uuid = %account, sneaker_uuid = tracing::field::Empty),
        err
    )]
    async fn create_sneaker(
        &self,
        account: AccountUuid,
        sneaker: NewSneaker,
    ) -> Result<SneakerRecord, SneakersServiceError> {
        if let Some(field) = sneaker.blank_field() {
            return Err(SneakersServiceError::BlankField(field));
        }

        let uuid = SneakerUuid::new();

        Span::current().record("sneaker_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_sneaker(&mut tx, account, uuid, &sneaker)
            .await?;

        tx.commit().await?;

        info!(sneaker_uuid = %record.uuid, "created sneaker");

        Ok(record)
    }

    #[tracing::instrument(
        name = "sneakers.service.replace_sneaker",
        skip(self, update),
        fields(account_uuid = %account, sneaker_uuid = %sneaker),
        err
    )]
    async fn replace_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
        update: NewSneaker,
    ) -> Result<SneakerRecord, SneakersServiceError> {
        if let Some(field) = update.blank_field() {
            return Err(SneakersServiceError::BlankField(field));
        }

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_sneaker(&mut tx, account, sneaker, &update)
            .await?;

        tx.commit().await?;

        info!(sneaker_uuid = %record.uuid, "replaced sneaker");

        Ok(record)
    }

    #[tracing::instrument(
        name = "sneakers.service.patch_sneaker",
        skip(self, patch),
        fields(account_uuid = %account, sneaker_uuid = %sneaker),
        err
    )]
    async fn patch_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
        patch: SneakerPatch,
    ) -> Result<SneakerRecord, SneakersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_sneaker(&mut tx, account, sneaker).await?;
        let update = patch.apply(&current);

        if let Some(field) = update.blank_field() {
            return Err(SneakersServiceError::BlankField(field));
        }

        let record = self
            .repository
            .update_sneaker(&mut tx, account, sneaker, &update)
            .await?;

        tx.commit().await?;

        info!(sneaker_uuid = %record.uuid, "patched sneaker");

        Ok(record)
    }

    #[tracing::instrument(
        name = "sneakers.service.delete_sneaker",
        skip(self),
        fields(account_uuid = %account, sneaker_uuid = %sneaker),
        err
    )]
    async fn delete_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<(), SneakersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_sneaker(&mut tx, account, sneaker)
            .await?;

        if rows_affected == 0 {
            return Err(SneakersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(sneaker_uuid = %sneaker, "deleted sneaker");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SneakersService: Send + Sync {
    /// A page of the account's sneakers, newest first, optionally filtered by brand or colour.
    async fn list_sneakers(
        &self,
        account: AccountUuid,
        filter: Option<String>,
        page: PageRequest,
    ) -> Result<Page<SneakerRecord>, SneakersServiceError>;

    /// Retrieve a single sneaker owned by the account.
    async fn get_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<SneakerRecord, SneakersServiceError>;

    /// Add a sneaker to the account.
    async fn create_sneaker(
        &self,
        account: AccountUuid,
        sneaker: NewSneaker,
    ) -> Result<SneakerRecord, SneakersServiceError>;

    /// Replace every field of a sneaker.
    async fn replace_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
        update: NewSneaker,
    ) -> Result<SneakerRecord, SneakersServiceError>;

    /// Update only the fields present in the patch.
    async fn patch_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
        patch: SneakerPatch,
    ) -> Result<SneakerRecord, SneakersServiceError>;

    /// Delete a sneaker.
    async fn delete_sneaker(
        &self,
        account: AccountUuid,
        sneaker: SneakerUuid,
    ) -> Result<(), SneakersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shoeclean::catalog::ServiceType;
    use testresult::TestResult;

    use crate::{
        domain::orders::OrdersService,
        test::{TestContext, helpers::new_sneaker},
    };

    use super::*;

    #[tokio::test]
    async fn create_then_get_sneaker() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        let created = ctx
            .sneakers
            .create_sneaker(customer.account, new_sneaker("Nike", "White"))
            .await?;

        let found = ctx
            .sneakers
            .get_sneaker(customer.account, created.uuid)
            .await?;

        assert_eq!(found, created);
        assert_eq!(found.account_uuid, customer.account);

        Ok(())
    }

    #[tokio::test]
    async fn blank_brand_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        let result = ctx
            .sneakers
            .create_sneaker(customer.account, new_sneaker("  ", "White"))
            .await;

        assert!(
            matches!(result, Err(SneakersServiceError::BlankField("brand"))),
            "expected BlankField, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_accounts_sneaker_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.register("owner@example.com").await?;
        let other = ctx.register("other@example.com").await?;

        let sneaker = ctx.create_sneaker(owner.account, "Adidas", "Black").await?;

        let result = ctx.sneakers.get_sneaker(other.account, sneaker.uuid).await;

        assert!(
            matches!(result, Err(SneakersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let result = ctx
            .sneakers
            .delete_sneaker(other.account, sneaker.uuid)
            .await;

        assert!(matches!(result, Err(SneakersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filters_brand_or_color() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        ctx.create_sneaker(customer.account, "Nike", "White").await?;
        ctx.create_sneaker(customer.account, "Adidas", "Black").await?;
        ctx.create_sneaker(customer.account, "Vans", "Checkered White").await?;

        let page = ctx
            .sneakers
            .list_sneakers(customer.account, None, PageRequest::new(0, 10))
            .await?;

        let brands: Vec<&str> = page.items.iter().map(|s| s.brand.as_str()).collect();

        assert_eq!(brands, vec!["Vans", "Adidas", "Nike"]);
        assert_eq!(page.total, 3);

        let white = ctx
            .sneakers
            .list_sneakers(customer.account, Some("white".to_string()), PageRequest::new(0, 10))
            .await?;

        assert_eq!(white.total, 2);

        let adidas = ctx
            .sneakers
            .list_sneakers(customer.account, Some("ADI".to_string()), PageRequest::new(0, 10))
            .await?;

        assert_eq!(adidas.total, 1);
        assert_eq!(adidas.items[0].brand, "Adidas");

        Ok(())
    }

    #[tokio::test]
    async fn replace_and_patch_update_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;
        let sneaker = ctx.create_sneaker(customer.account, "Nike", "White").await?;

        let replaced = ctx
            .sneakers
            .replace_sneaker(
                customer.account,
                sneaker.uuid,
                NewSneaker {
                    brand: "New Balance".to_string(),
                    color: "Grey".to_string(),
                    image_url: Some("https://img.example.com/nb.png".to_string()),
                },
            )
            .await?;

        assert_eq!(replaced.brand, "New Balance");
        assert_eq!(replaced.color, "Grey");

        let patched = ctx
            .sneakers
            .patch_sneaker(
                customer.account,
                sneaker.uuid,
                SneakerPatch {
                    color: Some("Navy".to_string()),
                    ..SneakerPatch::default()
                },
            )
            .await?;

        assert_eq!(patched.brand, "New Balance");
        assert_eq!(patched.color, "Navy");
        assert_eq!(patched.image_url, replaced.image_url);

        Ok(())
    }

    #[tokio::test]
    async fn delete_makes_sneaker_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;
        let sneaker = ctx.create_sneaker(customer.account, "Nike", "White").await?;

        ctx.sneakers
            .delete_sneaker(customer.account, sneaker.uuid)
            .await?;

        let result = ctx
            .sneakers
            .get_sneaker(customer.account, sneaker.uuid)
            .await;

        assert!(matches!(result, Err(SneakersServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn sneaker_in_an_order_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.register("budi@example.com").await?;

        ctx.set_catalog(ServiceType::DeepCleaning, Decimal::from(15000))
            .await?;

        let order = ctx.new_order(&customer, 1).await?;
        let sneakers = order.sneakers.clone();
        let record = ctx.orders.create_order(customer.account, order).await?;

        for sneaker in &sneakers {
            let result = ctx.sneakers.delete_sneaker(customer.account, *sneaker).await;

            assert!(
                matches!(result, Err(SneakersServiceError::InvalidReference)),
                "expected InvalidReference, got {result:?}"
            );
        }

        let details = ctx
            .orders
            .get_order_details(customer.account, &record.usc_id)
            .await?;

        assert_eq!(details.sneakers, sneakers);

        Ok(())
    }
}
