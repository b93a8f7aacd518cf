use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CookieStoreError;

/// `SameSite` attribute of a stored cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Attributes written alongside a cookie value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    /// Absolute expiry. `None` makes it a session cookie.
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieOptions {
    /// Secure, strict-same-site cookie with the given expiry.
    pub fn strict(expires: Option<DateTime<Utc>>) -> Self {
        Self {
            expires,
            secure: true,
            same_site: SameSite::Strict,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.map(|exp| now >= exp).unwrap_or(false)
    }
}

/// Cookie jar abstraction - file-backed or in-memory.
///
/// Expired cookies are never returned.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Get a live cookie value.
    async fn get(&self, name: &str) -> Option<String>;

    /// Set a cookie, replacing any previous value.
    async fn set(&self, name: &str, value: &str, options: CookieOptions)
    -> Result<(), CookieStoreError>;

    /// Remove a cookie. Removing a missing cookie is not an error.
    async fn remove(&self, name: &str) -> Result<(), CookieStoreError>;

    /// Drop every session cookie, as a browser does when it closes.
    async fn end_session(&self) -> Result<(), CookieStoreError>;
}
