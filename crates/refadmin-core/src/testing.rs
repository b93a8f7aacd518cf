//! In-memory doubles for the ports, for tests in this and downstream crates.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::{Profile, PurchaseCount, ReferredCountByDate, UserReferral};
use crate::error::{ApiError, CookieStoreError};
use crate::listing::FilterMap;
use crate::ports::{AdminApi, CookieOptions, CookieStore, ReferralCodeStatus};
use crate::quiz::QuizSubmission;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cookie jar without expiry handling. Tests expire cookies by hand.
#[derive(Default)]
pub struct MemoryCookies {
    cookies: Mutex<HashMap<String, (String, CookieOptions)>>,
}

impl MemoryCookies {
    /// Insert a long-lived strict cookie.
    pub fn insert(&self, name: &str, value: &str) {
        lock(&self.cookies).insert(
            name.to_string(),
            (value.to_string(), CookieOptions::strict(None)),
        );
    }

    pub fn entry(&self, name: &str) -> Option<(String, CookieOptions)> {
        lock(&self.cookies).get(name).cloned()
    }

    pub fn clear(&self) {
        lock(&self.cookies).clear();
    }
}

#[async_trait]
impl CookieStore for MemoryCookies {
    async fn get(&self, name: &str) -> Option<String> {
        lock(&self.cookies).get(name).map(|(value, _)| value.clone())
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        options: CookieOptions,
    ) -> Result<(), CookieStoreError> {
        lock(&self.cookies).insert(name.to_string(), (value.to_string(), options));
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        lock(&self.cookies).remove(name);
        Ok(())
    }

    async fn end_session(&self) -> Result<(), CookieStoreError> {
        lock(&self.cookies).retain(|_, (_, options)| options.expires.is_some());
        Ok(())
    }
}

/// A call observed by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login { username: String },
    FetchProfiles { page: u32, filters: Option<FilterMap> },
    FetchReferrals { page: u32, filters: Option<FilterMap> },
    UpdateReferralCode { user_id: String, code: String },
    NotifyUser { user_id: String, title: String, body: String },
    NotifyUsers { user_ids: Vec<String>, title: String, body: String },
    NotifyAll { title: String, body: String },
    PostQuiz(Value),
    ReferredCount(String),
    ReferredCountByDate(String),
    PurchaseCount(String),
    DeletedCount(String),
}

#[derive(Default)]
struct Fixtures {
    credentials: Option<(String, String, String)>,
    profiles: Vec<Profile>,
    referrals: Vec<UserReferral>,
    referral_status: Option<String>,
    by_date: Vec<ReferredCountByDate>,
    purchases: Vec<PurchaseCount>,
    deleted: u64,
}

/// `AdminApi` that records every call and answers from fixtures.
///
/// Failures are injected per operation name (`"login"`, `"profiles"`,
/// `"referrals"`, `"update_ref"`, `"notify_user"`, `"notify_users"`,
/// `"notify_all"`, `"quiz"`, `"referred_count"`, `"referred_count_by_date"`,
/// `"purchase_count"`, `"deleted_count"`).
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    fixtures: Mutex<Fixtures>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(self, username: &str, password: &str, token: &str) -> Self {
        lock(&self.fixtures).credentials =
            Some((username.to_string(), password.to_string(), token.to_string()));
        self
    }

    pub fn set_profiles(&self, profiles: Vec<Profile>) {
        lock(&self.fixtures).profiles = profiles;
    }

    pub fn set_referrals(&self, referrals: Vec<UserReferral>) {
        lock(&self.fixtures).referrals = referrals;
    }

    pub fn set_referral_status(&self, status: Option<&str>) {
        lock(&self.fixtures).referral_status = status.map(str::to_string);
    }

    pub fn set_stats(
        &self,
        by_date: Vec<ReferredCountByDate>,
        purchases: Vec<PurchaseCount>,
        deleted: u64,
    ) {
        let mut fixtures = lock(&self.fixtures);
        fixtures.by_date = by_date;
        fixtures.purchases = purchases;
        fixtures.deleted = deleted;
    }

    /// Make `op` fail with `error` until [`RecordingApi::recover`].
    pub fn fail(&self, op: &'static str, error: ApiError) {
        lock(&self.failures).insert(op, error);
    }

    pub fn recover(&self, op: &'static str) {
        lock(&self.failures).remove(op);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }

    pub fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: Some(format!("user {id}")),
            referral_code: None,
            user_details: None,
            image_url: None,
            push_token: None,
            phone: None,
            extra: Default::default(),
        }
    }

    pub fn referral(n: u64) -> UserReferral {
        UserReferral {
            referrer_user_id: json!(n),
            referrer_name: format!("referrer {n}"),
            referee_user_id: json!(n + 1000),
            referee_name: format!("referee {n}"),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn record(&self, op: &'static str, call: ApiCall) -> Result<(), ApiError> {
        lock(&self.calls).push(call);
        match lock(&self.failures).get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminApi for RecordingApi {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.record(
            "login",
            ApiCall::Login {
                username: username.to_string(),
            },
        )?;
        match &lock(&self.fixtures).credentials {
            Some((user, pass, token)) if user == username && pass == password => {
                Ok(token.clone())
            }
            _ => Err(ApiError::Rejected("Invalid credentials".to_string())),
        }
    }

    async fn fetch_profiles(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<Profile>, ApiError> {
        self.record(
            "profiles",
            ApiCall::FetchProfiles {
                page,
                filters: filters.cloned(),
            },
        )?;
        Ok(lock(&self.fixtures).profiles.clone())
    }

    async fn fetch_user_referrals(
        &self,
        page: u32,
        filters: Option<&FilterMap>,
    ) -> Result<Vec<UserReferral>, ApiError> {
        self.record(
            "referrals",
            ApiCall::FetchReferrals {
                page,
                filters: filters.cloned(),
            },
        )?;
        Ok(lock(&self.fixtures).referrals.clone())
    }

    async fn update_referral_code(
        &self,
        user_id: &str,
        new_referral_code: &str,
    ) -> Result<ReferralCodeStatus, ApiError> {
        self.record(
            "update_ref",
            ApiCall::UpdateReferralCode {
                user_id: user_id.to_string(),
                code: new_referral_code.to_string(),
            },
        )?;
        Ok(ReferralCodeStatus(lock(&self.fixtures).referral_status.clone()))
    }

    async fn notify_user(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
    ) -> Result<Value, ApiError> {
        self.record(
            "notify_user",
            ApiCall::NotifyUser {
                user_id: user_id.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            },
        )?;
        Ok(json!({ "sent": 1 }))
    }

    async fn notify_users(
        &self,
        user_ids: &[String],
        title: &str,
        body: &str,
    ) -> Result<Value, ApiError> {
        self.record(
            "notify_users",
            ApiCall::NotifyUsers {
                user_ids: user_ids.to_vec(),
                title: title.to_string(),
                body: body.to_string(),
            },
        )?;
        Ok(json!({ "sent": user_ids.len() }))
    }

    async fn notify_all(&self, title: &str, body: &str) -> Result<Value, ApiError> {
        self.record(
            "notify_all",
            ApiCall::NotifyAll {
                title: title.to_string(),
                body: body.to_string(),
            },
        )?;
        Ok(json!({ "sent": "all" }))
    }

    async fn post_quiz(&self, quiz: &QuizSubmission) -> Result<Value, ApiError> {
        let payload =
            serde_json::to_value(quiz).map_err(|e| ApiError::Malformed(e.to_string()))?;
        self.record("quiz", ApiCall::PostQuiz(payload))?;
        Ok(json!({ "id": 1 }))
    }

    async fn referred_count(&self, username: &str) -> Result<Value, ApiError> {
        self.record("referred_count", ApiCall::ReferredCount(username.to_string()))?;
        let total: u64 = lock(&self.fixtures)
            .by_date
            .iter()
            .map(|row| row.referred_count)
            .sum();
        Ok(json!(total))
    }

    async fn referred_count_by_date(
        &self,
        username: &str,
    ) -> Result<Vec<ReferredCountByDate>, ApiError> {
        self.record(
            "referred_count_by_date",
            ApiCall::ReferredCountByDate(username.to_string()),
        )?;
        Ok(lock(&self.fixtures).by_date.clone())
    }

    async fn purchase_count(&self, username: &str) -> Result<Vec<PurchaseCount>, ApiError> {
        self.record("purchase_count", ApiCall::PurchaseCount(username.to_string()))?;
        Ok(lock(&self.fixtures).purchases.clone())
    }

    async fn deleted_count(&self, username: &str) -> Result<u64, ApiError> {
        self.record("deleted_count", ApiCall::DeletedCount(username.to_string()))?;
        Ok(lock(&self.fixtures).deleted)
    }
}
