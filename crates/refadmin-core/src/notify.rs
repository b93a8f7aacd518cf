//! Push notification form and dispatcher.

use serde_json::Value;

use crate::domain::NotificationTarget;
use crate::error::ApiError;
use crate::ports::AdminApi;

pub const SEND_FAILED: &str = "Failed to send notification. Please try again.";

/// Recipient selection of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationMode {
    #[default]
    All,
    Single,
    List,
}

impl NotificationMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(NotificationMode::All),
            "one" | "single" => Some(NotificationMode::Single),
            "list" => Some(NotificationMode::List),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationMode::All => "All Users",
            NotificationMode::Single => "Single User",
            NotificationMode::List => "List of Users",
        }
    }
}

/// A validated send, ready for [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub target: NotificationTarget,
    pub title: String,
    pub body: String,
}

/// Form state of the send-notification page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationForm {
    pub mode: NotificationMode,
    pub title: String,
    pub body: String,
    pub single_user: String,
    selected_users: Vec<String>,
    in_flight: bool,
    error: Option<String>,
}

impl NotificationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_users(&self) -> &[String] {
        &self.selected_users
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Add a list-mode recipient, trimmed. Blank and duplicate ids are
    /// ignored.
    pub fn add_user(&mut self, user: &str) -> bool {
        let user = user.trim();
        if user.is_empty() || self.selected_users.iter().any(|u| u == user) {
            return false;
        }
        self.selected_users.push(user.to_string());
        true
    }

    pub fn remove_user(&mut self, user: &str) -> bool {
        let before = self.selected_users.len();
        self.selected_users.retain(|u| u != user);
        before != self.selected_users.len()
    }

    /// Whether the send button is enabled.
    pub fn can_submit(&self) -> bool {
        if self.in_flight || self.title.trim().is_empty() || self.body.trim().is_empty() {
            return false;
        }
        match self.mode {
            NotificationMode::All => true,
            NotificationMode::Single => !self.single_user.trim().is_empty(),
            NotificationMode::List => !self.selected_users.is_empty(),
        }
    }

    /// Lock the form and produce the dispatch, or `None` if submit is
    /// disabled.
    pub fn begin_submit(&mut self) -> Option<Dispatch> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        let target = match self.mode {
            NotificationMode::All => NotificationTarget::All,
            NotificationMode::Single => NotificationTarget::Single(self.single_user.clone()),
            NotificationMode::List => NotificationTarget::List(self.selected_users.clone()),
        };
        Some(Dispatch {
            target,
            title: self.title.clone(),
            body: self.body.clone(),
        })
    }

    /// Success resets everything; failure keeps the contents.
    pub fn complete<T>(&mut self, result: &Result<T, ApiError>) {
        match result {
            Ok(_) => *self = Self::default(),
            Err(e) => {
                tracing::error!(error = %e, "Sending notification failed");
                self.in_flight = false;
                self.error = Some(SEND_FAILED.to_string());
            }
        }
    }
}

/// Invoke exactly one of the three notification endpoints.
pub async fn dispatch(api: &dyn AdminApi, dispatch: &Dispatch) -> Result<Value, ApiError> {
    let Dispatch {
        target,
        title,
        body,
    } = dispatch;
    match target {
        NotificationTarget::All => api.notify_all(title, body).await,
        NotificationTarget::Single(user_id) => api.notify_user(user_id, title, body).await,
        NotificationTarget::List(user_ids) => api.notify_users(user_ids, title, body).await,
    }
}
