use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A referrer/referee pair from `/admin/userRef/user-referrals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReferral {
    pub referrer_user_id: Value,
    pub referrer_name: String,
    pub referee_user_id: Value,
    pub referee_name: String,
    pub created_at: String,
}

impl UserReferral {
    /// `created_at` in local time, or the raw string when it does not parse.
    pub fn created_at_display(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(at) => at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.created_at.clone(),
        }
    }

    pub fn referrer_id_display(&self) -> String {
        id_display(&self.referrer_user_id)
    }

    pub fn referee_id_display(&self) -> String {
        id_display(&self.referee_user_id)
    }
}

/// Render an id that may arrive as a number or a string.
fn id_display(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
