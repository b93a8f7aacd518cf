//! Change-referral-code form.

use crate::error::ApiError;
use crate::ports::{AdminApi, ReferralCodeStatus};

/// Outcome of an update as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralUpdate {
    pub success: bool,
    pub message: String,
}

impl ReferralUpdate {
    /// Interpret the backend's `status` field.
    pub fn from_status(status: &ReferralCodeStatus) -> Self {
        match status.0.as_deref() {
            Some("success") => Self {
                success: true,
                message: "Referral code updated successfully".to_string(),
            },
            Some(other) => Self {
                success: false,
                message: format!("Failed to update referral code: {other}"),
            },
            None => Self {
                success: true,
                message: "Referral code update completed".to_string(),
            },
        }
    }

    pub fn from_result(result: Result<ReferralCodeStatus, ApiError>) -> Self {
        match result {
            Ok(status) => Self::from_status(&status),
            Err(e) => Self {
                success: false,
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferralCodeForm {
    pub user_id: String,
    pub new_code: String,
    message: Option<String>,
}

impl ReferralCodeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error"))
    }

    /// Both fields are required.
    pub fn can_submit(&self) -> bool {
        !self.user_id.is_empty() && !self.new_code.is_empty()
    }

    /// Send the update. The code goes out lower-cased; success clears the
    /// form.
    pub async fn submit(&mut self, api: &dyn AdminApi) -> Option<ReferralUpdate> {
        if !self.can_submit() {
            return None;
        }
        let code = self.new_code.to_lowercase();
        let result = api.update_referral_code(&self.user_id, &code).await;
        if let Err(e) = &result {
            tracing::error!(user_id = %self.user_id, error = %e, "Updating referral code failed");
        }

        let update = ReferralUpdate::from_result(result);
        if update.success {
            self.user_id.clear();
            self.new_code.clear();
            self.message = Some(update.message.clone());
        } else {
            self.message = Some(format!("Error: {}", update.message));
        }
        Some(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ApiCall, RecordingApi};

    #[test]
    fn test_status_interpretation() {
        let ok = ReferralUpdate::from_status(&ReferralCodeStatus(Some("success".into())));
        let taken = ReferralUpdate::from_status(&ReferralCodeStatus(Some("taken".into())));
        let silent = ReferralUpdate::from_status(&ReferralCodeStatus(None));

        assert!(ok.success);
        assert!(!taken.success);
        assert_eq!(taken.message, "Failed to update referral code: taken");
        assert!(silent.success);
        assert_eq!(silent.message, "Referral code update completed");
    }

    #[tokio::test]
    async fn test_submit_lowercases_and_clears() {
        let api = RecordingApi::new();
        api.set_referral_status(Some("success"));
        let mut form = ReferralCodeForm::new();
        form.user_id = "42".into();
        form.new_code = "SPRING24".into();

        let update = form.submit(&api).await.unwrap();

        assert!(update.success);
        assert_eq!(
            api.calls(),
            vec![ApiCall::UpdateReferralCode {
                user_id: "42".into(),
                code: "spring24".into()
            }]
        );
        assert!(form.user_id.is_empty());
        assert!(!form.is_error());
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_prefixes_error() {
        let api = RecordingApi::new();
        api.fail("update_ref", ApiError::Network("connection refused".into()));
        let mut form = ReferralCodeForm::new();
        form.user_id = "42".into();
        form.new_code = "x".into();

        let update = form.submit(&api).await.unwrap();

        assert!(!update.success);
        assert!(form.is_error());
        assert_eq!(form.message(), Some("Error: Network error: connection refused"));
        assert_eq!(form.user_id, "42");
    }

    #[tokio::test]
    async fn test_missing_fields_not_sent() {
        let api = RecordingApi::new();
        let mut form = ReferralCodeForm::new();
        form.user_id = "42".into();

        assert!(form.submit(&api).await.is_none());
        assert!(api.calls().is_empty());
    }
}
