//! Paginated, filterable record listings shared by the referrals and
//! profiles pages.

mod filters;
mod pagination;

pub use filters::{FilterField, FilterMap, FilterRow, FilterRows, PROFILE_FILTERS, REFERRAL_FILTERS};
pub use pagination::{ErrorPolicy, ListingState, PAGE_SIZE, PageQuery, load_page};
