use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User profile row as returned by `/admin/users/profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub user_details: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub push_token: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Fields the console does not display are kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Display value for an optional column.
    pub fn display(field: &Option<String>) -> &str {
        match field.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => "N/A",
        }
    }
}
