//! Catalogs

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogsServiceError;
pub use service::*;
