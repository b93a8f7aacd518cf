use async_trait::async_trait;

use refadmin_core::ApiError;
use refadmin_core::domain::UserReferral;
use refadmin_core::listing::{ErrorPolicy, FilterField, PageQuery, REFERRAL_FILTERS};
use refadmin_core::ports::AdminApi;

use super::listing::Listed;
use crate::router::Route;

#[async_trait]
impl Listed for UserReferral {
    const ROUTE: Route = Route::UserReferrals;
    const TITLE: &'static str = "User Referrals";
    const FILTERS: &'static [FilterField] = REFERRAL_FILTERS;
    const HEADERS: &'static [&'static str] = &[
        "Referrer User ID",
        "Referrer Name",
        "Referee User ID",
        "Referee Name",
        "Created At",
    ];
    const EMPTY: &'static str = "No referrals found.";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::KeepRecords;
    const ERROR_MESSAGE: &'static str = "Failed to load user referrals.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.referrer_id_display(),
            self.referrer_name.clone(),
            self.referee_id_display(),
            self.referee_name.clone(),
            self.created_at_display(),
        ]
    }

    async fn fetch(api: &dyn AdminApi, query: PageQuery) -> Result<Vec<Self>, ApiError> {
        api.fetch_user_referrals(query.page, query.filters.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use refadmin_core::listing::FilterMap;
    use refadmin_core::testing::{ApiCall, RecordingApi};

    use crate::state::AppState;
    use crate::views::{ListingView, Reply, View};

    use super::*;

    #[tokio::test]
    async fn test_next_keeps_filters_and_fetches_page_two() {
        let api = Arc::new(RecordingApi::new());
        api.set_referrals(vec![RecordingApi::referral(1), RecordingApi::referral(2)]);
        let state = AppState::for_tests(api.clone()).await;
        let mut view = ListingView::<UserReferral>::new();

        view.enter(&state).await;
        view.handle(&state, "filter", "add").await;
        view.handle(&state, "filter", "field 1 referrer_name").await;
        view.handle(&state, "filter", "value 1 Ann").await;
        view.handle(&state, "apply", "").await;
        assert_eq!(view.handle(&state, "next", "").await, Reply::Updated);

        let filters: Option<FilterMap> = Some([("referrer_name".to_string(), "Ann".to_string())].into_iter().collect());
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::FetchReferrals { page: 1, filters: None },
                ApiCall::FetchReferrals { page: 1, filters: filters.clone() },
                ApiCall::FetchReferrals { page: 2, filters },
            ]
        );
        assert_eq!(view.listing().page(), 2);
        assert!(view.render().contains("101  1 "));
    }

    #[tokio::test]
    async fn test_error_keeps_previous_rows() {
        let api = Arc::new(RecordingApi::new());
        api.set_referrals(vec![RecordingApi::referral(1)]);
        let state = AppState::for_tests(api.clone()).await;
        let mut view = ListingView::<UserReferral>::new();
        view.enter(&state).await;

        api.fail("referrals", ApiError::Network("down".into()));
        view.handle(&state, "next", "").await;

        let screen = view.render();
        assert!(screen.contains("! Failed to load user referrals."));
        assert!(screen.contains("referrer 1"));
    }

    #[tokio::test]
    async fn test_unknown_filter_field_rejected() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = ListingView::<UserReferral>::new();
        view.handle(&state, "filter", "add").await;

        let reply = view.handle(&state, "filter", "field 1 phone").await;

        assert!(matches!(reply, Reply::Alert(msg) if msg.starts_with("Choose one of")));
    }

    #[tokio::test]
    async fn test_empty_page_disables_next() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = ListingView::<UserReferral>::new();
        view.enter(&state).await;

        assert!(!view.listing().has_more());
        view.handle(&state, "next", "").await;

        assert_eq!(api.calls().len(), 1);
        assert!(view.render().contains("No referrals found."));
    }
}
