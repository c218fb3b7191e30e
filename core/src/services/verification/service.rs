//! One-time code generation and matching

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};

/// Length of a one-time code in digits
pub const CODE_LENGTH: usize = 6;

/// Generates and matches 6-digit one-time codes
///
/// Codes come from the OS CSPRNG and are compared in constant time to
/// keep matching free of timing side channels.
pub struct SecretCodeIssuer;

impl SecretCodeIssuer {
    /// Generate a cryptographically secure random one-time code
    ///
    /// # Returns
    ///
    /// A random 6-digit code as a zero-padded string
    pub fn generate() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo has a very slight bias, negligible for 6-digit codes
        let code = num % 1_000_000;
        format!("{:06}", code)
    }

    /// Check whether a submitted code has the expected shape
    pub fn well_formed(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
    }

    /// Constant-time comparison of a stored and a submitted code
    pub fn matches(stored: &str, submitted: &str) -> bool {
        if stored.len() != submitted.len() {
            return false;
        }
        constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        for _ in 0..64 {
            let code = SecretCodeIssuer::generate();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(SecretCodeIssuer::well_formed("012345"));
        assert!(!SecretCodeIssuer::well_formed("12345"));
        assert!(!SecretCodeIssuer::well_formed("1234567"));
        assert!(!SecretCodeIssuer::well_formed("12a456"));
        assert!(!SecretCodeIssuer::well_formed(""));
    }

    #[test]
    fn test_matches() {
        assert!(SecretCodeIssuer::matches("123456", "123456"));
        assert!(!SecretCodeIssuer::matches("123456", "123457"));
        assert!(!SecretCodeIssuer::matches("123456", "12345"));
    }
}
