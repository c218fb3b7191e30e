//! SMTP delivery of one-time codes and password-reset links.
//!
//! Both sends are plain-text and bounded by a 30 second timeout so a
//! stalled relay cannot hang a login.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use tp_core::services::verification::EmailNotifier;

use crate::InfrastructureError;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP relay settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,
    /// Relay port
    pub port: u16,
    /// Relay username
    pub username: String,
    /// Relay password
    pub password: String,
    /// From address, e.g. `TrackPerf <no-reply@trackperf.io>`
    pub from: String,
}

impl SmtpConfig {
    /// Load settings from the environment
    ///
    /// `EMAIL_HOST`, `EMAIL_USER`, `EMAIL_PASSWORD` and `EMAIL_FROM` are
    /// required; `EMAIL_PORT` falls back to 587.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let required = |key: &str| {
            std::env::var(key)
                .map_err(|_| InfrastructureError::Config(format!("{} is not set", key)))
        };

        Ok(Self {
            host: required("EMAIL_HOST")?,
            port: std::env::var("EMAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username: required("EMAIL_USER")?,
            password: required("EMAIL_PASSWORD")?,
            from: required("EMAIL_FROM")?,
        })
    }
}

/// SMTP implementation of EmailNotifier using lettre
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    /// Build the pooled transport from configuration
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InfrastructureError::Email(format!("invalid SMTP relay: {}", e)))?
            .credentials(Credentials::new(config.username, config.password))
            .port(config.port)
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from: config.from,
        })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("invalid from address: {}", e))?,
            )
            .to(to.parse().map_err(|e| format!("invalid to address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| format!("failed to build email: {}", e))?;

        let send = self.transport.send(message);
        match tokio::time::timeout(SEND_TIMEOUT, send).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(format!("smtp send failed: {}", e)),
            Err(_) => Err("smtp send timed out".to_string()),
        }
    }
}

#[async_trait]
impl EmailNotifier for SmtpNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        let body = format!(
            "Hello,\n\
            \n\
            Your TrackPerf login code is:\n\
            \n\
            {}\n\
            \n\
            This code will expire in 15 minutes.\n\
            \n\
            If you didn't try to log in, you can safely ignore this email.\n\
            \n\
            The TrackPerf Team",
            code
        );

        let result = self
            .send(email, "Your TrackPerf verification code", body)
            .await;
        if result.is_ok() {
            tracing::info!(event = "code_email_sent", "Verification code delivered");
        }
        result
    }

    async fn send_password_reset(
        &self,
        email: &str,
        raw_token: &str,
        return_url: &str,
    ) -> Result<(), String> {
        let link = format!("{}?token={}", return_url, raw_token);
        let body = format!(
            "Hello,\n\
            \n\
            A password reset was requested for your TrackPerf account.\n\
            \n\
            To choose a new password, open the link below:\n\
            \n\
            {}\n\
            \n\
            This link will expire in 1 hour.\n\
            \n\
            If you didn't request a reset, you can safely ignore this email \
            and your password will stay unchanged.\n\
            \n\
            The TrackPerf Team",
            link
        );

        let result = self.send(email, "Reset your TrackPerf password", body).await;
        if result.is_ok() {
            tracing::info!(event = "reset_email_sent", "Password reset email delivered");
        }
        result
    }
}
