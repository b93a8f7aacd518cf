//! # Refadmin Core
//!
//! The domain layer of the referral admin console.
//! This crate holds the view state machines and the ports the HTTP client
//! and cookie stores implement. It performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod listing;
pub mod login;
pub mod notify;
pub mod ports;
pub mod quiz;
pub mod referral;
pub mod session;
pub mod stats;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{ApiError, CookieStoreError, QuizError};
pub use session::{GateDecision, SessionContext, SessionPolicy};
