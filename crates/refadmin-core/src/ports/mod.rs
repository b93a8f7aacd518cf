//! Ports - trait definitions for external dependencies.
//! The HTTP client and the cookie jars in `refadmin-infra` implement these.

mod admin_api;
mod cookie;

pub use admin_api::{AdminApi, ReferralCodeStatus};
pub use cookie::{CookieOptions, CookieStore, SameSite};
