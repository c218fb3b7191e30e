//! Authentication service module
//!
//! This module provides the account lifecycle service:
//! - Email/display-name registration and login
//! - One-time code verification with email delivery
//! - Password reset via single-use tokens
//! - OAuth callback handling and account completion

mod config;
pub mod identity;
mod service;
mod validate;

#[cfg(test)]
mod tests;

pub use config::AccountLifecycleConfig;
pub use service::AccountLifecycle;

// Export selected validation helpers for public use
pub use identity::{is_email, mask_email, normalize_email};
pub use validate::{
    parse_company_type, validate_email, validate_password, validate_person_name,
};
