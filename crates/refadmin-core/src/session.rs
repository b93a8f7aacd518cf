//! Session context and the auth gate that wraps protected views.
//!
//! The bearer token lives only in the injected [`CookieStore`]; the
//! `authenticated` flag kept here is a cache of "the `token` cookie exists"
//! and is re-synchronised whenever the gate is evaluated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::CookieStoreError;
use crate::ports::{CookieOptions, CookieStore};

/// Name of the cookie holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Where unauthenticated renders are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where a successful login lands.
pub const HOME_PATH: &str = "/user-referrals";

/// Longest accepted token lifetime; larger TTLs are clamped to it.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Lifetime of the token cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPolicy {
    /// Absolute expiry measured from login.
    Expiring(TimeDelta),
    /// No expiry; the cookie lives until the session ends.
    SessionOnly,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        SessionPolicy::Expiring(TimeDelta::hours(1))
    }
}

impl SessionPolicy {
    /// `0` selects a session-only cookie. Values above
    /// [`MAX_SESSION_TTL_SECS`] are clamped.
    pub fn from_ttl_secs(secs: u64) -> Self {
        if secs == 0 {
            return SessionPolicy::SessionOnly;
        }
        let clamped = secs.min(MAX_SESSION_TTL_SECS);
        if clamped < secs {
            tracing::warn!(secs, max = MAX_SESSION_TTL_SECS, "Session TTL clamped");
        }
        i64::try_from(clamped)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .map(SessionPolicy::Expiring)
            .unwrap_or(SessionPolicy::SessionOnly)
    }

    /// Expiry for a cookie set at `now`. An expiry past the representable
    /// range falls back to a session cookie.
    pub fn expires_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            SessionPolicy::Expiring(ttl) => now.checked_add_signed(*ttl),
            SessionPolicy::SessionOnly => None,
        }
    }
}

/// What a protected view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session check still running - show a placeholder.
    Loading,
    /// Not logged in - navigate to the given path.
    Redirect(&'static str),
    Render,
}

impl GateDecision {
    pub fn decide(loading: bool, authenticated: bool) -> Self {
        if loading {
            GateDecision::Loading
        } else if !authenticated {
            GateDecision::Redirect(LOGIN_PATH)
        } else {
            GateDecision::Render
        }
    }
}

/// Explicitly injected session state shared by the HTTP client and views.
pub struct SessionContext {
    store: Arc<dyn CookieStore>,
    policy: SessionPolicy,
    loading: AtomicBool,
    authenticated: AtomicBool,
}

impl SessionContext {
    /// A context in the loading state. Call [`SessionContext::init`] before
    /// rendering anything protected.
    pub fn new(store: Arc<dyn CookieStore>, policy: SessionPolicy) -> Self {
        Self {
            store,
            policy,
            loading: AtomicBool::new(true),
            authenticated: AtomicBool::new(false),
        }
    }

    /// Check for a persisted token and leave the loading state.
    pub async fn init(&self) {
        let has_token = self.store.get(TOKEN_COOKIE).await.is_some();
        self.authenticated.store(has_token, Ordering::SeqCst);
        self.loading.store(false, Ordering::SeqCst);
        tracing::debug!(authenticated = has_token, "Session initialized");
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Persist the token and mark the session authenticated.
    pub async fn login(&self, token: &str) -> Result<(), CookieStoreError> {
        let expires = self.policy.expires_from(Utc::now());
        self.store
            .set(TOKEN_COOKIE, token, CookieOptions::strict(expires))
            .await?;
        self.authenticated.store(true, Ordering::SeqCst);
        tracing::info!(expires = ?expires, "Session started");
        Ok(())
    }

    /// Delete the token. The session is logged out even if the store fails.
    pub async fn logout(&self) -> Result<(), CookieStoreError> {
        self.authenticated.store(false, Ordering::SeqCst);
        self.store.remove(TOKEN_COOKIE).await?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// Current bearer token, if the cookie is still alive.
    pub async fn token(&self) -> Option<String> {
        let token = self.store.get(TOKEN_COOKIE).await;
        self.authenticated.store(token.is_some(), Ordering::SeqCst);
        token
    }

    /// Re-derive `authenticated` from cookie presence.
    pub async fn sync(&self) -> bool {
        self.token().await.is_some()
    }

    /// Decide how a protected view renders.
    pub async fn gate(&self) -> GateDecision {
        if self.is_loading() {
            return GateDecision::Loading;
        }
        let authenticated = self.sync().await;
        GateDecision::decide(false, authenticated)
    }

    /// Drop session-only cookies at shutdown.
    pub async fn teardown(&self) -> Result<(), CookieStoreError> {
        self.store.end_session().await
    }
}
