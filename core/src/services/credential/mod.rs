//! Credential hashing module
//!
//! Wraps bcrypt behind an async interface with an enforced cost floor.

mod service;

pub use service::{CredentialHasher, MIN_BCRYPT_COST};
