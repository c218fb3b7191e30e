//! Mock provider client and state store for tests in this crate and
//! downstream crates

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{ProviderClient, ProviderIdentity, StateStore};

/// Returns a fixed identity, or an error when configured to fail.
pub struct MockProvider {
    pub identity: Mutex<ProviderIdentity>,
    pub fail: Mutex<bool>,
}

impl MockProvider {
    pub fn returning(identity: ProviderIdentity) -> Self {
        Self {
            identity: Mutex::new(identity),
            fail: Mutex::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            identity: Mutex::new(ProviderIdentity {
                email: String::new(),
                name: String::new(),
                subject: String::new(),
            }),
            fail: Mutex::new(true),
        }
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn exchange_code(
        &self,
        _code: &str,
        _redirect_uri: &str,
    ) -> Result<ProviderIdentity, String> {
        if *self.fail.lock().unwrap() {
            return Err("provider rejected the code".to_string());
        }
        Ok(self.identity.lock().unwrap().clone())
    }
}

/// In-memory single-use state store.
pub struct MockStateStore {
    states: Arc<Mutex<HashMap<String, u64>>>,
}

impl MockStateStore {
    pub fn new() -> Self {
        Self {
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MockStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MockStateStore {
    async fn put(&self, state: &str, ttl_seconds: u64) -> Result<(), String> {
        self.states
            .lock()
            .unwrap()
            .insert(state.to_string(), ttl_seconds);
        Ok(())
    }

    async fn consume(&self, state: &str) -> Result<bool, String> {
        Ok(self.states.lock().unwrap().remove(state).is_some())
    }
}
