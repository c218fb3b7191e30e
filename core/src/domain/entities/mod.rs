//! Domain entities representing core business objects.

pub mod account;
pub mod claims;

// Re-export commonly used types
pub use account::{
    Account, CompanyType, VerificationState,
    CODE_TTL_MINUTES, RESET_TOKEN_TTL_HOURS,
};
pub use claims::{Claims, JWT_AUDIENCE, JWT_ISSUER, SESSION_EXPIRY_DAYS};
