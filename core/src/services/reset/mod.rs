//! Password-reset token module
//!
//! Issues 32-byte hex reset tokens and matches presented tokens against
//! their stored bcrypt hashes.

mod service;

pub use service::{ResetTokenIssuer, RESET_TOKEN_BYTES};
