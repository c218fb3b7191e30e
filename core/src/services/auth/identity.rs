//! Identifier utility functions for the account lifecycle
//!
//! A login identifier may be an email address or a display name; these
//! helpers normalize, classify and mask identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Syntactic email shape; the authority for "is this an email"
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Normalize an email for storage and lookup: trimmed, lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether an identifier looks like an email address
pub fn is_email(identifier: &str) -> bool {
    EMAIL_REGEX.is_match(identifier.trim())
}

/// Mask an email for logging (keeps the first character and the domain)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = &local[..local
                .char_indices()
                .nth(1)
                .map(|(i, _)| i)
                .unwrap_or(local.len())];
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
