//! In-memory cookie jar - used for `--memory-session` and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use refadmin_core::CookieStoreError;
use refadmin_core::ports::{CookieOptions, CookieStore};

use super::StoredCookie;

/// Cookie jar backed by a HashMap with an async RwLock.
///
/// Note: the session is lost on process exit.
pub struct InMemoryCookieStore {
    jar: RwLock<HashMap<String, StoredCookie>>,
}

impl InMemoryCookieStore {
    pub fn new() -> Self {
        Self {
            jar: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieStore for InMemoryCookieStore {
    async fn get(&self, name: &str) -> Option<String> {
        let jar = self.jar.read().await;
        let cookie = jar.get(name)?;

        if cookie.is_expired() {
            drop(jar);
            let mut jar = self.jar.write().await;
            jar.remove(name);
            tracing::debug!(cookie = name, "Expired cookie evicted");
            return None;
        }

        Some(cookie.value.clone())
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        options: CookieOptions,
    ) -> Result<(), CookieStoreError> {
        let mut jar = self.jar.write().await;
        jar.insert(name.to_string(), StoredCookie::new(value, options));
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        let mut jar = self.jar.write().await;
        jar.remove(name);
        Ok(())
    }

    async fn end_session(&self) -> Result<(), CookieStoreError> {
        let mut jar = self.jar.write().await;
        jar.retain(|_, cookie| cookie.is_persistent());
        Ok(())
    }
}
