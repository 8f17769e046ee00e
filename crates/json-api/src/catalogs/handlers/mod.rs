//! Catalog Handlers

pub(crate) mod index;
pub(crate) mod upsert;
