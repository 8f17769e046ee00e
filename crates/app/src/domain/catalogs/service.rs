//! Catalogs service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use shoeclean::catalog::ServiceType;
use tracing::info;

use crate::{
    database::Db,
    domain::catalogs::{
        CatalogsServiceError,
        data::NewCatalog,
        records::{CatalogRecord, CatalogUuid},
        repository::PgCatalogsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogsService {
    db: Db,
    repository: PgCatalogsRepository,
}

impl PgCatalogsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogsService for PgCatalogsService {
    #[tracing::instrument(name = "catalogs.service.list_catalogs", skip(self), err)]
    async fn list_catalogs(&self) -> Result<Vec<CatalogRecord>, CatalogsServiceError> {
        let mut tx = self.db.begin().await?;

        let catalogs = self.repository.list_catalogs(&mut tx).await?;

        tx.commit().await?;

        Ok(catalogs)
    }

    #[tracing::instrument(
        name = "catalogs.service.get_catalog",
        skip(self),
        fields(service_type = %service_type),
        err
    )]
    async fn get_catalog(
        &self,
        service_type: ServiceType,
    ) -> Result<CatalogRecord, CatalogsServiceError> {
        let mut tx = self.db.begin().await?;

        let catalog = self.repository.get_catalog(&mut tx, service_type).await?;

        tx.commit().await?;

        Ok(catalog)
    }

    #[tracing::instrument(
        name = "catalogs.service.upsert_catalog",
        skip(self, catalog),
        fields(service_type = %catalog.service_type),
        err
    )]
    async fn upsert_catalog(
        &self,
        catalog: NewCatalog,
    ) -> Result<CatalogRecord, CatalogsServiceError> {
        if catalog.price <= Decimal::ZERO {
            return Err(CatalogsServiceError::NonPositivePrice);
        }

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .upsert_catalog(&mut tx, CatalogUuid::new(), &catalog)
            .await?;

        tx.commit().await?;

        info!(catalog_uuid = %record.uuid, price = %record.price, "saved catalog");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait CatalogsService: Send + Sync {
    /// Every catalog entry, ordered by service type.
    async fn list_catalogs(&self) -> Result<Vec<CatalogRecord>, CatalogsServiceError>;

    /// The catalog entry for a service type.
    async fn get_catalog(
        &self,
        service_type: ServiceType,
    ) -> Result<CatalogRecord, CatalogsServiceError>;

    /// Create the entry for a service type, or replace its description and price.
    async fn upsert_catalog(
        &self,
        catalog: NewCatalog,
    ) -> Result<CatalogRecord, CatalogsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn deep_cleaning(price: i64) -> NewCatalog {
        NewCatalog {
            service_type: ServiceType::DeepCleaning,
            description: "Deep cleaning, inside and out".to_string(),
            price: Decimal::from(price),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_replaces_by_service_type() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.catalogs.upsert_catalog(deep_cleaning(15000)).await?;
        let replaced = ctx.catalogs.upsert_catalog(deep_cleaning(17500)).await?;

        assert_eq!(replaced.uuid, created.uuid);
        assert_eq!(replaced.price, Decimal::from(17500));

        let catalogs = ctx.catalogs.list_catalogs().await?;

        assert_eq!(catalogs.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_catalog_by_service_type() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalogs.upsert_catalog(deep_cleaning(15000)).await?;

        let catalog = ctx.catalogs.get_catalog(ServiceType::DeepCleaning).await?;

        assert_eq!(catalog.service_type, ServiceType::DeepCleaning);
        assert_eq!(catalog.price, Decimal::from(15000));

        Ok(())
    }

    #[tokio::test]
    async fn missing_catalog_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalogs.get_catalog(ServiceType::Repair).await;

        assert!(
            matches!(result, Err(CatalogsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn non_positive_price_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.catalogs.upsert_catalog(deep_cleaning(0)).await;

        assert!(
            matches!(result, Err(CatalogsServiceError::NonPositivePrice)),
            "expected NonPositivePrice, got {result:?}"
        );
    }
}
