//! Cookie jar implementations.
//!
//! - [`InMemoryCookieStore`] keeps everything for the life of the process.
//! - [`FileCookieStore`] persists expiring cookies to a JSON file so a
//!   session survives restarts; session cookies stay in memory.

mod file;
mod memory;

pub use file::FileCookieStore;
pub use memory::InMemoryCookieStore;

use chrono::Utc;
use refadmin_core::ports::CookieOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    options: CookieOptions,
}

impl StoredCookie {
    fn new(value: &str, options: CookieOptions) -> Self {
        Self {
            value: value.to_string(),
            options,
        }
    }

    fn is_expired(&self) -> bool {
        self.options.is_expired_at(Utc::now())
    }

    fn is_persistent(&self) -> bool {
        self.options.expires.is_some()
    }
}
