//! OAuth login module
//!
//! This module provides the provider-backed login flow:
//! - Single-use CSRF state issuance and consumption
//! - Authorization-code exchange through a provider client
//! - Account resolution: link-by-email or provider-only creation

pub mod mock;
mod service;
mod traits;

pub use service::{OauthExchange, STATE_TTL_SECONDS};
pub use traits::{ProviderClient, ProviderIdentity, StateStore};
