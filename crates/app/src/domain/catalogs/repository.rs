//! Catalogs Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use shoeclean::catalog::ServiceType;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::decode_label,
    domain::catalogs::{
        data::NewCatalog,
        records::{CatalogRecord, CatalogUuid},
    },
};

const LIST_CATALOGS_SQL: &str = include_str!("sql/list_catalogs.sql");
const GET_CATALOG_SQL: &str = include_str!("sql/get_catalog.sql");
const GET_CATALOG_BY_UUID_SQL: &str = include_str!("sql/get_catalog_by_uuid.sql");
const UPSERT_CATALOG_SQL: &str = include_str!("sql/upsert_catalog.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogsRepository;

impl PgCatalogsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_catalogs(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CatalogRecord>, sqlx::Error> {
        query_as::<Postgres, CatalogRecord>(LIST_CATALOGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_catalog(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_type: ServiceType,
    ) -> Result<CatalogRecord, sqlx::Error> {
        query_as::<Postgres, CatalogRecord>(GET_CATALOG_SQL)
            .bind(service_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_catalog_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        catalog: CatalogUuid,
    ) -> Result<CatalogRecord, sqlx::Error> {
        query_as::<Postgres, CatalogRecord>(GET_CATALOG_BY_UUID_SQL)
            .bind(catalog.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_catalog(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        catalog: CatalogUuid,
        new: &NewCatalog,
    ) -> Result<CatalogRecord, sqlx::Error> {
        query_as::<Postgres, CatalogRecord>(UPSERT_CATALOG_SQL)
            .bind(catalog.into_uuid())
            .bind(new.service_type.as_str())
            .bind(&new.description)
            .bind(new.price)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CatalogUuid::from_uuid(row.try_get("uuid")?),
            service_type: decode_label(row, "service_type")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
