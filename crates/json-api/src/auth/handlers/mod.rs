//! Auth Handlers

pub(crate) mod login;
pub(crate) mod passwords;
pub(crate) mod register;
pub(crate) mod roles;
