use serde::{Deserialize, Serialize};

/// One bar of the referred-count-by-date series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferredCountByDate {
    #[serde(default)]
    pub referrer_user_id: String,
    pub referral_date: String,
    pub referred_count: u64,
}

/// One bar of the purchase-count-by-reward series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCount {
    #[serde(default)]
    pub referrer_user_id: String,
    pub reward_title: String,
    pub purchase_count: u64,
}

/// Body of the deleted-count endpoint: a bare number or a wrapped one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeletedCount {
    Scalar(u64),
    Wrapped { deleted_count: u64 },
}

impl DeletedCount {
    pub fn value(self) -> u64 {
        match self {
            DeletedCount::Scalar(n) | DeletedCount::Wrapped { deleted_count: n } => n,
        }
    }
}
