//! Mock email notifier for tests in this crate and downstream crates

use async_trait::async_trait;
use std::sync::Mutex;

use super::traits::EmailNotifier;

/// Records every outbound email; optionally fails each send.
pub struct MockEmailNotifier {
    pub fail: Mutex<bool>,
    pub codes: Mutex<Vec<(String, String)>>,
    pub resets: Mutex<Vec<(String, String, String)>>,
}

impl MockEmailNotifier {
    pub fn new() -> Self {
        Self {
            fail: Mutex::new(false),
            codes: Mutex::new(Vec::new()),
            resets: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        let notifier = Self::new();
        *notifier.fail.lock().unwrap() = true;
        notifier
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn last_code(&self) -> Option<String> {
        self.codes.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn last_reset_token(&self) -> Option<String> {
        self.resets
            .lock()
            .unwrap()
            .last()
            .map(|(_, token, _)| token.clone())
    }
}

impl Default for MockEmailNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailNotifier for MockEmailNotifier {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), String> {
        if *self.fail.lock().unwrap() {
            return Err("smtp unavailable".to_string());
        }
        self.codes
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_password_reset(
        &self,
        email: &str,
        raw_token: &str,
        return_url: &str,
    ) -> Result<(), String> {
        if *self.fail.lock().unwrap() {
            return Err("smtp unavailable".to_string());
        }
        self.resets.lock().unwrap().push((
            email.to_string(),
            raw_token.to_string(),
            return_url.to_string(),
        ));
        Ok(())
    }
}
