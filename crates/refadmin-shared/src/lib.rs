//! # Refadmin Shared
//!
//! Wire types of the admin backend, shared by the HTTP client and the
//! mock backend used in tests.

pub mod dto;
pub mod response;

pub use response::ErrorBody;
