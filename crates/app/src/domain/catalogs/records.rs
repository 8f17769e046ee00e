//! Catalog Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::catalog::ServiceType;

use crate::uuids::TypedUuid;

/// Catalog UUID
pub type CatalogUuid = TypedUuid<CatalogRecord>;

/// Catalog Record
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub uuid: CatalogUuid,
    pub service_type: ServiceType,
    pub description: String,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
