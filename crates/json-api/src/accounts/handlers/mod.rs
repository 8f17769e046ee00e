//! Account Handlers

pub(crate) mod details;
