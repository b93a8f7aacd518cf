//! # Refadmin Infrastructure
//!
//! Concrete implementations of the ports defined in `refadmin-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Cookie stores only, no HTTP client
//! - `http` - `reqwest`-backed `AdminApi`

pub mod cookies;

#[cfg(feature = "http")]
pub mod http;

pub use cookies::{FileCookieStore, InMemoryCookieStore};

#[cfg(feature = "http")]
pub use http::{ApiConfig, HttpAdminApi};
