//! Application state - shared by the shell and every view.

use std::sync::Arc;

use refadmin_core::SessionContext;
use refadmin_core::ports::{AdminApi, CookieStore};
use refadmin_infra::{FileCookieStore, HttpAdminApi, InMemoryCookieStore};

use crate::config::{AppConfig, SessionStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AdminApi>,
    pub session: Arc<SessionContext>,
}

impl AppState {
    /// Build the application state with the configured implementations.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CookieStore> = match &config.session_store {
            SessionStore::File(path) => match FileCookieStore::open(path).await {
                Ok(store) => {
                    tracing::info!(path = %path.display(), "Using file-backed session");
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %e,
                        "Failed to open cookie jar. Using in-memory session."
                    );
                    Arc::new(InMemoryCookieStore::new())
                }
            },
            SessionStore::Memory => {
                tracing::info!("Using in-memory session");
                Arc::new(InMemoryCookieStore::new())
            }
        };

        let session = Arc::new(SessionContext::new(store, config.session_policy()));
        session.init().await;

        let api = HttpAdminApi::new(&config.api, session.clone())?;

        tracing::info!("Application state initialized");

        Ok(Self {
            api: Arc::new(api),
            session,
        })
    }

    /// Logged-out state over an in-memory cookie jar.
    #[cfg(test)]
    pub async fn for_tests(api: Arc<dyn AdminApi>) -> Self {
        let session = Arc::new(SessionContext::new(
            Arc::new(refadmin_core::testing::MemoryCookies::default()),
            refadmin_core::SessionPolicy::default(),
        ));
        session.init().await;
        Self { api, session }
    }
}
