use async_trait::async_trait;

use refadmin_core::notify::{NotificationForm, NotificationMode, dispatch};

use super::render::heading;
use super::{CommandHelp, Reply, View};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("mode all|one|list", "Choose the recipients"),
    ("title <text>", "Notification title"),
    ("body <text>", "Notification body"),
    ("user <id>", "Recipient in single-user mode"),
    ("add <id>", "Add a recipient in list mode"),
    ("remove <id>", "Remove a recipient in list mode"),
    ("send", "Send the notification"),
];

pub struct SendNotificationView {
    form: NotificationForm,
    sent: bool,
}

impl SendNotificationView {
    pub fn new() -> Self {
        Self {
            form: NotificationForm::new(),
            sent: false,
        }
    }
}

#[async_trait]
impl View for SendNotificationView {
    fn route(&self) -> Route {
        Route::SendNotification
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        self.sent = false;
        match command {
            "mode" => match NotificationMode::parse(args) {
                Some(mode) => self.form.mode = mode,
                None => return Reply::Usage("mode all|one|list"),
            },
            "title" => self.form.title = args.to_string(),
            "body" => self.form.body = args.to_string(),
            "user" => self.form.single_user = args.to_string(),
            "add" => {
                self.form.add_user(args);
            }
            "remove" => {
                self.form.remove_user(args);
            }
            "send" => {
                let Some(send) = self.form.begin_submit() else {
                    return Reply::Alert("Fill in the title, body and recipients first.".to_string());
                };
                let result = dispatch(state.api.as_ref(), &send).await;
                self.sent = result.is_ok();
                if self.sent {
                    tracing::info!(recipients = ?send.target, "Notification sent");
                }
                self.form.complete(&result);
            }
            _ => return Reply::Unknown,
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let form = &self.form;
        let mut out = heading("Send Notification");
        out.push_str(&format!("Send to: {}\n", form.mode.label()));
        match form.mode {
            NotificationMode::All => {}
            NotificationMode::Single => {
                out.push_str(&format!("User ID: {}\n", form.single_user));
            }
            NotificationMode::List => {
                out.push_str("Selected users:");
                if form.selected_users().is_empty() {
                    out.push_str(" none");
                }
                out.push('\n');
                for user in form.selected_users() {
                    out.push_str(&format!("  - {user}\n"));
                }
            }
        }
        out.push_str(&format!("Title: {}\n", form.title));
        out.push_str(&format!("Body:  {}\n", form.body));
        if let Some(error) = form.error() {
            out.push_str(&format!("! {error}\n"));
        }
        if self.sent {
            out.push_str("* Notification sent.\n");
        }
        out.push_str(if form.is_in_flight() {
            "Sending...\n"
        } else if form.can_submit() {
            "[send]\n"
        } else {
            " send \n"
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use refadmin_core::ApiError;
    use refadmin_core::testing::{ApiCall, RecordingApi};

    use super::*;

    async fn fill(view: &mut SendNotificationView, state: &AppState, mode: &str) {
        view.handle(state, "mode", mode).await;
        view.handle(state, "title", "Hello").await;
        view.handle(state, "body", "World").await;
    }

    #[tokio::test]
    async fn test_list_mode_sends_once_and_resets() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = SendNotificationView::new();
        fill(&mut view, &state, "list").await;
        view.handle(&state, "add", "u1").await;
        view.handle(&state, "add", "u2").await;
        view.handle(&state, "add", "u1").await;

        view.handle(&state, "send", "").await;

        assert_eq!(
            api.calls(),
            vec![ApiCall::NotifyUsers {
                user_ids: vec!["u1".into(), "u2".into()],
                title: "Hello".into(),
                body: "World".into(),
            }]
        );
        let screen = view.render();
        assert!(screen.contains("Send to: All Users"));
        assert!(screen.contains("* Notification sent."));
    }

    #[tokio::test]
    async fn test_single_mode_requires_user() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = SendNotificationView::new();
        fill(&mut view, &state, "one").await;

        assert!(matches!(view.handle(&state, "send", "").await, Reply::Alert(_)));
        assert!(api.calls().is_empty());

        view.handle(&state, "user", "u7").await;
        view.handle(&state, "send", "").await;
        assert!(matches!(&api.calls()[0], ApiCall::NotifyUser { user_id, .. } if user_id == "u7"));
    }

    #[tokio::test]
    async fn test_failure_keeps_form() {
        let api = Arc::new(RecordingApi::new());
        api.fail("notify_all", ApiError::Network("down".into()));
        let state = AppState::for_tests(api).await;
        let mut view = SendNotificationView::new();
        fill(&mut view, &state, "all").await;

        view.handle(&state, "send", "").await;

        let screen = view.render();
        assert!(screen.contains("! Failed to send notification. Please try again."));
        assert!(screen.contains("Title: Hello"));
    }

    #[tokio::test]
    async fn test_bad_mode_shows_usage() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api).await;
        let mut view = SendNotificationView::new();

        assert_eq!(
            view.handle(&state, "mode", "everyone").await,
            Reply::Usage("mode all|one|list")
        );
    }
}
