//! Catalogs Data

use rust_decimal::Decimal;
use shoeclean::catalog::ServiceType;

/// Catalog entry to create or replace, keyed by service type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCatalog {
    pub service_type: ServiceType,
    pub description: String,
    pub price: Decimal,
}
