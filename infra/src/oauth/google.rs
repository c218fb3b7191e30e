//! Google implementation of the ProviderClient trait.
//!
//! Exchanges the authorization code for an access token, then fetches
//! the userinfo document to obtain the subject, email and display name.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use tp_core::services::oauth::{ProviderClient, ProviderIdentity};

use crate::InfrastructureError;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google OAuth application credentials
#[derive(Debug, Clone)]
pub struct GoogleOauthConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
}

impl GoogleOauthConfig {
    /// Load credentials from `GOOGLE_CLIENT_ID` and `GOOGLE_CLIENT_SECRET`
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| InfrastructureError::Config("GOOGLE_CLIENT_ID is not set".to_string()))?;
        let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").map_err(|_| {
            InfrastructureError::Config("GOOGLE_CLIENT_SECRET is not set".to_string())
        })?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    id: String,
    email: String,
    #[serde(default)]
    name: String,
}

/// Google implementation of ProviderClient
pub struct GoogleProvider {
    client: reqwest::Client,
    config: GoogleOauthConfig,
}

impl GoogleProvider {
    /// Create a provider client with a bounded-timeout HTTP client
    pub fn new(config: GoogleOauthConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ProviderClient for GoogleProvider {
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderIdentity, String> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let token_response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("token request failed: {}", e))?;

        if !token_response.status().is_success() {
            let status = token_response.status();
            tracing::warn!(
                status = %status,
                event = "oauth_token_rejected",
                "Provider rejected the authorization code"
            );
            return Err(format!("token endpoint returned {}", status));
        }

        let token: TokenResponse = token_response
            .json()
            .await
            .map_err(|e| format!("malformed token response: {}", e))?;

        let userinfo_response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| format!("userinfo request failed: {}", e))?;

        if !userinfo_response.status().is_success() {
            return Err(format!(
                "userinfo endpoint returned {}",
                userinfo_response.status()
            ));
        }

        let info: UserInfo = userinfo_response
            .json()
            .await
            .map_err(|e| format!("malformed userinfo response: {}", e))?;

        if info.email.is_empty() {
            return Err("provider returned no email".to_string());
        }

        Ok(ProviderIdentity {
            email: info.email,
            name: info.name,
            subject: info.id,
        })
    }
}
