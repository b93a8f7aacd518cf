//! `reqwest` implementation of the admin API port.

mod client;
mod config;

pub use client::{HttpAdminApi, REQUEST_ID_HEADER};
pub use config::ApiConfig;
