//! OAuth provider clients

pub mod google;

pub use google::{GoogleOauthConfig, GoogleProvider};
