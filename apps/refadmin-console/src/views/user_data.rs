use async_trait::async_trait;

use refadmin_core::ApiError;
use refadmin_core::domain::Profile;
use refadmin_core::listing::{ErrorPolicy, FilterField, PROFILE_FILTERS, PageQuery};
use refadmin_core::ports::AdminApi;

use super::listing::Listed;
use crate::router::Route;

#[async_trait]
impl Listed for Profile {
    const ROUTE: Route = Route::UserData;
    const TITLE: &'static str = "User Profiles";
    const FILTERS: &'static [FilterField] = PROFILE_FILTERS;
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Referral Code",
        "Phone",
        "Image URL",
        "Push Token",
    ];
    const EMPTY: &'static str = "No profiles found.";
    const ERROR_POLICY: ErrorPolicy = ErrorPolicy::ClearRecords;
    const ERROR_MESSAGE: &'static str = "Failed to load user profiles.";

    fn cells(&self) -> Vec<String> {
        [
            &self.name,
            &self.referral_code,
            &self.phone,
            &self.image_url,
            &self.push_token,
        ]
        .into_iter()
        .fold(vec![self.id.clone()], |mut cells, field| {
            cells.push(Profile::display(field).to_string());
            cells
        })
    }

    async fn fetch(api: &dyn AdminApi, query: PageQuery) -> Result<Vec<Self>, ApiError> {
        api.fetch_profiles(query.page, query.filters.as_ref()).await
    }
}
