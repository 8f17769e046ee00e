//! Shoeclean application services and persistence.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod events;
pub mod pagination;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
