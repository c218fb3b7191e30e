//! Verification module for email-based login step-up
//!
//! This module provides the one-time code workflow:
//! - CSPRNG code generation
//! - Constant-time code matching
//! - The email delivery trait implementations plug into

pub mod mock;
mod service;
mod traits;

pub use service::{SecretCodeIssuer, CODE_LENGTH};
pub use traits::EmailNotifier;
