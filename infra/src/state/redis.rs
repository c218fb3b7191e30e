//! Redis-backed OAuth state store.
//!
//! States are stored under a SHA-256 keyed name so raw values never
//! appear in Redis. Consumption is a single `DEL`, whose reply count
//! makes the single-use guarantee atomic across instances.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use sha2::{Digest, Sha256};

use tp_core::services::oauth::StateStore;

use crate::InfrastructureError;

const KEY_PREFIX: &str = "oauth:state:";

/// Redis implementation of StateStore
#[derive(Clone)]
pub struct RedisStateStore {
    connection: MultiplexedConnection,
}

impl RedisStateStore {
    /// Connect to Redis at the given URL
    pub async fn connect(url: &str) -> Result<Self, InfrastructureError> {
        let client = Client::open(url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;
        let connection = client.get_multiplexed_async_connection().await?;

        tracing::info!(event = "state_store_connected", "Connected to Redis");
        Ok(Self { connection })
    }

    fn key_for(state: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(state.as_bytes());
        format!("{}{}", KEY_PREFIX, hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn put(&self, state: &str, ttl_seconds: u64) -> Result<(), String> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(Self::key_for(state), 1u8, ttl_seconds)
            .await
            .map_err(|e| format!("failed to store state: {}", e))
    }

    async fn consume(&self, state: &str) -> Result<bool, String> {
        let mut conn = self.connection.clone();
        let removed: u32 = conn
            .del(Self::key_for(state))
            .await
            .map_err(|e| format!("failed to consume state: {}", e))?;
        Ok(removed == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_hides_raw_state() {
        let key = RedisStateStore::key_for("super-secret-state");
        assert!(key.starts_with(KEY_PREFIX));
        assert!(!key.contains("super-secret-state"));
        assert_eq!(key.len(), KEY_PREFIX.len() + 64);
    }

    #[test]
    fn key_is_deterministic() {
        assert_eq!(
            RedisStateStore::key_for("abc"),
            RedisStateStore::key_for("abc")
        );
        assert_ne!(
            RedisStateStore::key_for("abc"),
            RedisStateStore::key_for("abd")
        );
    }
}
