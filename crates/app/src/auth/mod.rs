//! Authentication

pub mod data;
mod errors;
mod passwords;
pub mod records;
mod repository;
mod roles;
mod service;
mod tokens;

pub use data::*;
pub use errors::*;
pub use passwords::{PasswordError, hash_password, verify_password};
pub use records::*;
pub use roles::RoleName;
pub use service::*;
pub use tokens::{Claims, JwtManager, TokenError};
