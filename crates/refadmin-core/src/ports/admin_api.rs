use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Profile, PurchaseCount, ReferredCountByDate, UserReferral};
use crate::error::ApiError;
use crate::listing::FilterMap;
use crate::quiz::QuizSubmission;

/// Raw `status` reported by the referral-code update endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralCodeStatus(pub Option<String>);

/// The admin backend. One method per endpoint.
///
/// Implementations attach the session's bearer token to every call except
/// [`AdminApi::login`].
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    async fn fetch_profiles(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<Profile>, ApiError>;

    async fn fetch_user_referrals(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<UserReferral>, ApiError>;

    async fn update_referral_code(
        &self,
        user_id: &str,
        new_referral_code: &str,
    ) -> Result<ReferralCodeStatus, ApiError>;

    async fn notify_user(&self, user_id: &str, title: &str, body: &str)
    -> Result<Value, ApiError>;

    async fn notify_users(
        &self,
        user_ids: &[String],
        title: &str,
        body: &str,
    ) -> Result<Value, ApiError>;

    async fn notify_all(&self, title: &str, body: &str) -> Result<Value, ApiError>;

    async fn post_quiz(&self, quiz: &QuizSubmission) -> Result<Value, ApiError>;

    async fn referred_count(&self, username: &str) -> Result<Value, ApiError>;

    async fn referred_count_by_date(
        &self,
        username: &str,
    ) -> Result<Vec<ReferredCountByDate>, ApiError>;

    async fn purchase_count(&self, username: &str) -> Result<Vec<PurchaseCount>, ApiError>;

    async fn deleted_count(&self, username: &str) -> Result<u64, ApiError>;
}
