//! Test fixtures backed by a throwaway PostgreSQL database.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
