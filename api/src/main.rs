//! TrackPerf API entry point.
//!
//! Wires configuration, the MySQL pool, the SMTP notifier, the Google
//! OAuth client and the state store into the account lifecycle service,
//! then serves the HTTP routes. Missing required configuration aborts
//! startup with a clear message.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use tp_api::app;
use tp_api::config::ApiConfig;
use tp_api::routes::auth::{self, AppState};

use tp_core::services::auth::{AccountLifecycle, AccountLifecycleConfig};
use tp_core::services::credential::CredentialHasher;
use tp_core::services::oauth::StateStore;
use tp_core::services::token::{TokenSigner, TokenSignerConfig};
use tp_core::services::verification::EmailNotifier;

use tp_infra::database::{create_pool, MySqlAccountRepository};
use tp_infra::email::SmtpNotifier;
use tp_infra::oauth::GoogleProvider;
use tp_infra::state::{MemoryStateStore, RedisStateStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to MySQL")?;
    let accounts = Arc::new(MySqlAccountRepository::new(pool));

    let hasher = Arc::new(CredentialHasher::new(config.bcrypt_cost)?);
    let signer = Arc::new(TokenSigner::new(TokenSignerConfig {
        jwt_secret: config.jwt_secret.clone(),
        ..TokenSignerConfig::default()
    })?);

    let notifier: Arc<dyn EmailNotifier> = Arc::new(
        SmtpNotifier::new(config.smtp.clone()).context("failed to build SMTP transport")?,
    );
    let provider = Arc::new(
        GoogleProvider::new(config.google.clone()).context("failed to build OAuth client")?,
    );

    let states: Arc<dyn StateStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStateStore::connect(url)
                .await
                .context("failed to connect to Redis")?,
        ),
        None => {
            tracing::warn!(
                event = "memory_state_store",
                "REDIS_URL not set; using the in-memory OAuth state store"
            );
            Arc::new(MemoryStateStore::new())
        }
    };

    let lifecycle = Arc::new(AccountLifecycle::new(
        accounts,
        notifier,
        hasher,
        Arc::clone(&signer),
        provider,
        states,
        AccountLifecycleConfig {
            frontend_url: config.frontend_url.clone(),
        },
    ));

    let state = web::Data::new(AppState {
        lifecycle,
        oauth_redirect_uri: config.oauth_redirect_uri.clone(),
    });
    let signer_data = web::Data::from(signer);

    let bind = (config.host.clone(), config.port);
    tracing::info!(
        host = %config.host,
        port = config.port,
        event = "server_starting",
        "Starting TrackPerf API"
    );

    let frontend_url = config.frontend_url.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(app::cors(&frontend_url))
            .app_data(state.clone())
            .app_data(signer_data.clone())
            .configure(app::configure)
            .configure(auth::configure::<MySqlAccountRepository>)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
