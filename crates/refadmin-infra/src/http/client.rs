//! `AdminApi` over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use refadmin_core::domain::{DeletedCount, Profile, PurchaseCount, ReferredCountByDate, UserReferral};
use refadmin_core::listing::FilterMap;
use refadmin_core::ports::{AdminApi, ReferralCodeStatus};
use refadmin_core::quiz::QuizSubmission;
use refadmin_core::{ApiError, SessionContext};
use refadmin_shared::ErrorBody;
use refadmin_shared::dto::{
    FiltersBody, LoginRequest, LoginResponse, NotifyRequest, NotifyUsersRequest,
    UpdateReferralRequest, UpdateReferralResponse,
};

use super::ApiConfig;

/// Correlation header attached to every outgoing request.
pub static REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Admin backend client.
///
/// The bearer token is read from the shared [`SessionContext`] on every
/// call, so a logout takes effect immediately.
pub struct HttpAdminApi {
    client: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl HttpAdminApi {
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Network(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Network(format!(
                "invalid base URL {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::info!(base_url = %base_url, timeout = ?config.timeout, "Admin API client ready");

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Base URL joined with percent-encoded path segments.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client
            .request(method, self.url(segments))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    /// A request carrying the session's bearer token.
    async fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().await.ok_or_else(|| {
            tracing::warn!(path = %segments.join("/"), "No session token for request");
            ApiError::Unauthenticated
        })?;
        Ok(self.request(method, segments).bearer_auth(token))
    }

    /// Send and decode a 2xx JSON body. Non-2xx responses become
    /// [`ApiError::Status`] with the backend's message when it sent one.
    async fn send<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(op, error = %e, "Request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(op, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail().map(str::to_string));
            let message = detail.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            });
            tracing::warn!(op, status = status.as_u16(), message = %message, "Backend returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(op, error = %e, "Response body could not be decoded");
            ApiError::Malformed(e.to_string())
        })
    }

    async fn stats<T: DeserializeOwned>(
        &self,
        op: &'static str,
        username: &str,
        metric: &str,
    ) -> Result<T, ApiError> {
        let request = self
            .authorized(
                Method::GET,
                &["admin", "stats", "referral-stats", username, metric],
            )
            .await?;
        self.send(op, request).await
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let request = self
            .request(Method::POST, &["public", "admin_login"])
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            });

        let response = request.send().await.map_err(|e| {
            tracing::error!(op = "login", error = %e, "Request failed");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(username, status = status.as_u16(), "Login refused");
            return Err(ApiError::Rejected(
                body.message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }

        body.token
            .ok_or_else(|| ApiError::Malformed("login response carried no token".to_string()))
    }

    async fn fetch_profiles(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<Profile>, ApiError> {
        let mut request = self
            .authorized(Method::POST, &["admin", "users", "profiles"])
            .await?
            .query(&[("page", page)]);
        if let Some(filters) = filters {
            request = request.json(&FiltersBody {
                filters: Some(filters.clone()),
            });
        }
        self.send("fetch_profiles", request).await
    }

    async fn fetch_user_referrals(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<UserReferral>, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "userRef", "user-referrals"])
            .await?
            .query(&[("page", page)])
            .json(&FiltersBody {
                filters: filters.cloned(),
            });
        self.send("fetch_user_referrals", request).await
    }

    async fn update_referral_code(
        &self,
        user_id: &str,
        new_referral_code: &str,
    ) -> Result<ReferralCodeStatus, ApiError> {
        let request = self
            .authorized(Method::PUT, &["admin", "userRef", "update_ref"])
            .await?
            .json(&UpdateReferralRequest {
                user_id: user_id.to_string(),
                new_referral_code: new_referral_code.to_string(),
            });
        let response: UpdateReferralResponse = self.send("update_referral_code", request).await?;
        Ok(ReferralCodeStatus(response.status_str().map(str::to_string)))
    }

    async fn notify_user(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Value, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "notification", "notify", user_id])
            .await?
            .json(&NotifyRequest {
                title: title.to_string(),
                body: body.to_string(),
            });
        self.send("notify_user", request).await
    }

    async fn notify_users(
        &self,
        user_ids: &[String],
        title: &str,
        body: &str,
    ) -> Result<Value, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "notification", "notify", "users"])
            .await?
            .json(&NotifyUsersRequest {
                user_ids: user_ids.to_vec(),
                title: title.to_string(),
                body: body.to_string(),
            });
        self.send("notify_users", request).await
    }

    async fn notify_all(&self, title: &str, body: &str) -> Result<Value, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "notification", "notify", "all"])
            .await?
            .json(&NotifyRequest {
                title: title.to_string(),
                body: body.to_string(),
            });
        self.send("notify_all", request).await
    }

    async fn post_quiz(&self, quiz: &QuizSubmission) -> Result<Value, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "quizForm", "quiz"])
            .await?
            .json(quiz);
        self.send("post_quiz", request).await
    }

    async fn referred_count(&self, username: &str) -> Result<Value, ApiError> {
        self.stats("referred_count", username, "referred-count")
            .await
    }

    async fn referred_count_by_date(
        &self,
        username: &str,
    ) -> Result<Vec<ReferredCountByDate>, ApiError> {
        self.stats("referred_count_by_date", username, "referred-count-by-date")
            .await
    }

    async fn purchase_count(&self, username: &str) -> Result<Vec<PurchaseCount>, ApiError> {
        self.stats("purchase_count", username, "purchase-count")
            .await
    }

    async fn deleted_count(&self, username: &str) -> Result<u64, ApiError> {
        let count: DeletedCount = self
            .stats("deleted_count", username, "deleted-count")
            .await?;
        Ok(count.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::InMemoryCookieStore;
    use refadmin_core::SessionPolicy;

    fn client(base: &str) -> HttpAdminApi {
        let session = SessionContext::new(
            Arc::new(InMemoryCookieStore::new()),
            SessionPolicy::default(),
        );
        HttpAdminApi::new(&ApiConfig::new(base), Arc::new(session)).unwrap()
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let api = client("http://localhost:3000");
        let url = api.url(&["admin", "stats", "referral-stats", "a b/c", "purchase-count"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/admin/stats/referral-stats/a%20b%2Fc/purchase-count"
        );
    }

    #[test]
    fn test_base_path_prefix_kept() {
        let api = client("http://localhost:3000/api/");
        let url = api.url(&["admin", "quizForm", "quiz"]);
        assert_eq!(url.as_str(), "http://localhost:3000/api/admin/quizForm/quiz");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let session = Arc::new(SessionContext::new(
            Arc::new(InMemoryCookieStore::new()),
            SessionPolicy::default(),
        ));
        assert!(HttpAdminApi::new(&ApiConfig::new("not a url"), session.clone()).is_err());
        assert!(HttpAdminApi::new(&ApiConfig::new("mailto:admin@example.com"), session).is_err());
    }

    #[tokio::test]
    async fn test_no_token_is_unauthenticated() {
        let api = client("http://localhost:3000");
        let result = api.fetch_profiles(1, None).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }
}
