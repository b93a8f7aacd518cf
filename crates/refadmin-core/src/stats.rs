//! Referrer statistics: three sequential fetches, all or nothing.

use crate::domain::{PurchaseCount, ReferredCountByDate};
use crate::error::ApiError;
use crate::ports::AdminApi;

pub const STATS_FAILED: &str = "Failed to load referrer stats.";

/// Aggregates shown for one referrer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferrerStats {
    pub referred_count_by_date: Vec<ReferredCountByDate>,
    pub purchase_count: Vec<PurchaseCount>,
    pub deleted_count: u64,
}

impl ReferrerStats {
    /// Sum of the by-date series.
    pub fn total_referrals(&self) -> u64 {
        self.referred_count_by_date
            .iter()
            .map(|row| row.referred_count)
            .sum()
    }
}

/// Fetch the three aggregates one after another. The first failure aborts.
pub async fn fetch_referrer_stats(
    api: &dyn AdminApi,
    username: &str,
) -> Result<ReferrerStats, ApiError> {
    let referred_count_by_date = api.referred_count_by_date(username).await?;
    let purchase_count = api.purchase_count(username).await?;
    let deleted_count = api.deleted_count(username).await?;
    Ok(ReferrerStats {
        referred_count_by_date,
        purchase_count,
        deleted_count,
    })
}

/// Ticket for one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub generation: u64,
    pub username: String,
}

/// View state of the referrer stats page.
#[derive(Debug, Default)]
pub struct StatsState {
    pub username: String,
    stats: Option<(String, ReferrerStats)>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats and the username they were fetched for.
    pub fn stats(&self) -> Option<(&str, &ReferrerStats)> {
        self.stats.as_ref().map(|(user, stats)| (user.as_str(), stats))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_fetch(&self) -> bool {
        !self.loading && !self.username.is_empty()
    }

    /// Start a refresh for the current username. Earlier refreshes still in
    /// flight are superseded.
    pub fn begin(&mut self) -> Option<StatsRequest> {
        if self.username.is_empty() {
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Some(StatsRequest {
            generation: self.generation,
            username: self.username.clone(),
        })
    }

    /// Returns false when the response belongs to a superseded refresh.
    pub fn complete(
        &mut self,
        request: &StatsRequest,
        result: Result<ReferrerStats, ApiError>,
    ) -> bool {
        if request.generation != self.generation {
            tracing::debug!(username = %request.username, "Discarding superseded stats");
            return false;
        }
        self.loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some((request.username.clone(), stats));
            }
            Err(e) => {
                tracing::error!(username = %request.username, error = %e, "Fetching referrer stats failed");
                self.stats = None;
                self.error = Some(STATS_FAILED.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ApiCall, RecordingApi};

    fn by_date(date: &str, n: u64) -> ReferredCountByDate {
        ReferredCountByDate {
            referrer_user_id: "r1".into(),
            referral_date: date.into(),
            referred_count: n,
        }
    }

    #[tokio::test]
    async fn test_fetch_sequence_and_total() {
        let api = RecordingApi::new();
        api.set_stats(
            vec![by_date("2024-05-01", 3), by_date("2024-05-02", 4)],
            vec![PurchaseCount {
                referrer_user_id: "r1".into(),
                reward_title: "Mug".into(),
                purchase_count: 2,
            }],
            5,
        );

        let stats = fetch_referrer_stats(&api, "alice").await.unwrap();

        assert_eq!(stats.total_referrals(), 7);
        assert_eq!(stats.deleted_count, 5);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ReferredCountByDate("alice".into()),
                ApiCall::PurchaseCount("alice".into()),
                ApiCall::DeletedCount("alice".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_fetches() {
        let api = RecordingApi::new();
        api.fail("purchase_count", ApiError::Status { status: 500, message: "boom".into() });

        let result = fetch_referrer_stats(&api, "alice").await;

        assert!(result.is_err());
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_partial_failure_shows_nothing() {
        let mut state = StatsState::new();
        state.username = "alice".into();
        let req = state.begin().unwrap();
        state.complete(&req, Ok(ReferrerStats::default()));
        assert!(state.stats().is_some());

        let req = state.begin().unwrap();
        state.complete(&req, Err(ApiError::Network("down".into())));

        assert!(state.stats().is_none());
        assert_eq!(state.error(), Some(STATS_FAILED));
    }

    #[test]
    fn test_superseded_username_discarded() {
        let mut state = StatsState::new();
        state.username = "old".into();
        let old = state.begin().unwrap();
        state.username = "new".into();
        let new = state.begin().unwrap();

        assert!(state.complete(&new, Ok(ReferrerStats { deleted_count: 2, ..Default::default() })));
        assert!(!state.complete(&old, Ok(ReferrerStats { deleted_count: 9, ..Default::default() })));

        let (user, stats) = state.stats().unwrap();
        assert_eq!(user, "new");
        assert_eq!(stats.deleted_count, 2);
    }

    #[test]
    fn test_blank_username_cannot_fetch() {
        let mut state = StatsState::new();
        assert!(!state.can_fetch());
        assert!(state.begin().is_none());
    }
}
