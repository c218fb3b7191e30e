//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod oauth;
pub mod reset;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use auth::{AccountLifecycle, AccountLifecycleConfig};
pub use credential::CredentialHasher;
pub use oauth::{OauthExchange, ProviderClient, ProviderIdentity, StateStore};
pub use reset::ResetTokenIssuer;
pub use token::{TokenSigner, TokenSignerConfig};
pub use verification::{EmailNotifier, SecretCodeIssuer};
