//! Data Transfer Objects - request/response bodies of the admin API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// POST /public/admin_login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login answer: `token` on success, `message` on refusal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of the paginated list endpoints. `filters` is omitted when none
/// are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
}

/// PUT /admin/userRef/update_ref
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferralRequest {
    pub user_id: String,
    pub new_referral_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReferralResponse {
    /// Only a string status is meaningful.
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

impl UpdateReferralResponse {
    pub fn status_str(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.as_str())
    }
}

/// Single-user and broadcast notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub title: String,
    pub body: String,
}

/// POST /admin/notification/notify/users
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyUsersRequest {
    pub user_ids: Vec<String>,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_filters_serialize_to_empty_object() {
        let body = serde_json::to_value(FiltersBody::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_camel_case_bodies() {
        let update = serde_json::to_value(UpdateReferralRequest {
            user_id: "7".into(),
            new_referral_code: "abc".into(),
        })
        .unwrap();
        assert_eq!(update, json!({ "userId": "7", "newReferralCode": "abc" }));

        let notify = serde_json::to_value(NotifyUsersRequest {
            user_ids: vec!["u1".into()],
            title: "t".into(),
            body: "b".into(),
        })
        .unwrap();
        assert_eq!(notify, json!({ "userIds": ["u1"], "title": "t", "body": "b" }));
    }

    #[test]
    fn test_non_string_status_ignored() {
        let response: UpdateReferralResponse =
            serde_json::from_value(json!({ "status": 200 })).unwrap();
        assert_eq!(response.status_str(), None);
    }
}
