//! Token signer module for JWT management
//!
//! This module handles all session-token operations:
//! - HS256 session token generation
//! - Session token verification with issuer/audience checks

mod config;
mod service;

pub use config::TokenSignerConfig;
pub use service::TokenSigner;
