//! Login form.

use crate::error::ApiError;
use crate::ports::AdminApi;
use crate::session::{HOME_PATH, SessionContext};

pub const LOGIN_FAILED: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    error: Option<String>,
    loading: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.username.is_empty() && !self.password.is_empty()
    }

    /// Exchange credentials for a token and start the session.
    ///
    /// Returns the path to navigate to on success. On failure nothing is
    /// persisted and the error is kept on the form.
    pub async fn submit(
        &mut self,
        api: &dyn AdminApi,
        session: &SessionContext,
    ) -> Option<&'static str> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        let result = api.login(&self.username, &self.password).await;
        self.loading = false;

        let token = match result {
            Ok(token) => token,
            Err(ApiError::Rejected(message)) => {
                tracing::warn!(username = %self.username, "Login rejected");
                self.error = Some(message);
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Login request failed");
                self.error = Some(LOGIN_FAILED.to_string());
                return None;
            }
        };

        if let Err(e) = session.login(&token).await {
            tracing::error!(error = %e, "Persisting session token failed");
            self.error = Some(LOGIN_FAILED.to_string());
            return None;
        }

        self.error = None;
        self.password.clear();
        Some(HOME_PATH)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{GateDecision, LOGIN_PATH, SessionPolicy, TOKEN_COOKIE};
    use crate::testing::{MemoryCookies, RecordingApi};

    async fn session(cookies: &Arc<MemoryCookies>) -> SessionContext {
        let session = SessionContext::new(cookies.clone(), SessionPolicy::default());
        session.init().await;
        session
    }

    #[tokio::test]
    async fn test_valid_credentials_authenticate() {
        let api = RecordingApi::new().with_credentials("admin", "pw", "tok-9");
        let cookies = Arc::new(MemoryCookies::default());
        let session = session(&cookies).await;
        let mut form = LoginForm::new();
        form.username = "admin".into();
        form.password = "pw".into();

        let next = form.submit(&api, &session).await;

        assert_eq!(next, Some(HOME_PATH));
        assert!(session.is_authenticated());
        assert_eq!(session.gate().await, GateDecision::Render);
        assert_eq!(cookies.entry(TOKEN_COOKIE).unwrap().0, "tok-9");
    }

    #[tokio::test]
    async fn test_invalid_credentials_persist_nothing() {
        let api = RecordingApi::new().with_credentials("admin", "pw", "tok-9");
        let cookies = Arc::new(MemoryCookies::default());
        let session = session(&cookies).await;
        let mut form = LoginForm::new();
        form.username = "admin".into();
        form.password = "wrong".into();

        let next = form.submit(&api, &session).await;

        assert_eq!(next, None);
        assert_eq!(form.error(), Some("Invalid credentials"));
        assert!(cookies.entry(TOKEN_COOKIE).is_none());
        assert_eq!(session.gate().await, GateDecision::Redirect(LOGIN_PATH));
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_error() {
        let api = RecordingApi::new();
        api.fail("login", ApiError::Network("refused".into()));
        let cookies = Arc::new(MemoryCookies::default());
        let session = session(&cookies).await;
        let mut form = LoginForm::new();
        form.username = "admin".into();
        form.password = "pw".into();

        assert_eq!(form.submit(&api, &session).await, None);
        assert_eq!(form.error(), Some(LOGIN_FAILED));
        assert!(!form.is_loading());
    }
}
