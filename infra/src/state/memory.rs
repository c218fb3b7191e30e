//! In-memory OAuth state store for single-instance deployments and tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use tp_core::services::oauth::StateStore;

/// In-process implementation of StateStore
///
/// Expired entries are dropped lazily on access.
pub struct MemoryStateStore {
    states: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn put(&self, state: &str, ttl_seconds: u64) -> Result<(), String> {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        let mut states = self
            .states
            .write()
            .map_err(|_| "state store lock poisoned".to_string())?;
        states.retain(|_, expiry| *expiry > Utc::now());
        states.insert(state.to_string(), expires_at);
        Ok(())
    }

    async fn consume(&self, state: &str) -> Result<bool, String> {
        let mut states = self
            .states
            .write()
            .map_err(|_| "state store lock poisoned".to_string())?;
        match states.remove(state) {
            Some(expiry) => Ok(expiry > Utc::now()),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_is_single_use() {
        let store = MemoryStateStore::new();
        store.put("abc", 600).await.unwrap();

        assert!(store.consume("abc").await.unwrap());
        assert!(!store.consume("abc").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_state_is_rejected() {
        let store = MemoryStateStore::new();
        assert!(!store.consume("never-stored").await.unwrap());
    }

    #[tokio::test]
    async fn expired_state_is_rejected() {
        let store = MemoryStateStore::new();
        store.put("abc", 0).await.unwrap();
        assert!(!store.consume("abc").await.unwrap());
    }
}
