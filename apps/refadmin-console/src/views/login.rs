use async_trait::async_trait;

use refadmin_core::login::LoginForm;

use super::render::heading;
use super::{CommandHelp, Reply, View};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("username <name>", "Set the username"),
    ("password <secret>", "Set the password"),
    ("submit", "Log in"),
];

pub struct LoginView {
    form: LoginForm,
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            form: LoginForm::new(),
        }
    }
}

#[async_trait]
impl View for LoginView {
    fn route(&self) -> Route {
        Route::Login
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        match command {
            "username" => self.form.username = args.to_string(),
            "password" => self.form.password = args.to_string(),
            "submit" => {
                if !self.form.can_submit() {
                    return Reply::Alert("Username and password are required.".to_string());
                }
                if let Some(path) = self
                    .form
                    .submit(state.api.as_ref(), &state.session)
                    .await
                {
                    return Reply::Navigate(path);
                }
            }
            _ => return Reply::Unknown,
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let mut out = heading("Login");
        if let Some(error) = self.form.error() {
            out.push_str(&format!("! {error}\n"));
        }
        out.push_str(&format!("Username: {}\n", self.form.username));
        out.push_str(&format!(
            "Password: {}\n",
            "*".repeat(self.form.password.chars().count())
        ));
        out.push_str(if self.form.is_loading() {
            "Logging in...\n"
        } else {
            "[submit]\n"
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use refadmin_core::GateDecision;
    use refadmin_core::session::HOME_PATH;
    use refadmin_core::testing::RecordingApi;

    use super::*;

    #[tokio::test]
    async fn test_successful_login_navigates_home() {
        let api = Arc::new(RecordingApi::new().with_credentials("admin", "pw", "tok"));
        let state = AppState::for_tests(api).await;
        let mut view = LoginView::new();

        view.handle(&state, "username", "admin").await;
        view.handle(&state, "password", "pw").await;
        assert!(view.render().contains("Password: **\n"));

        assert_eq!(view.handle(&state, "submit", "").await, Reply::Navigate(HOME_PATH));
        assert_eq!(state.session.gate().await, GateDecision::Render);
    }

    #[tokio::test]
    async fn test_rejected_login_shows_message() {
        let api = Arc::new(RecordingApi::new().with_credentials("admin", "pw", "tok"));
        let state = AppState::for_tests(api).await;
        let mut view = LoginView::new();

        view.handle(&state, "username", "admin").await;
        view.handle(&state, "password", "nope").await;

        assert_eq!(view.handle(&state, "submit", "").await, Reply::Updated);
        assert!(view.render().contains("! Invalid credentials"));
        assert!(!state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_fields_not_submitted() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = LoginView::new();

        let reply = view.handle(&state, "submit", "").await;

        assert!(matches!(reply, Reply::Alert(_)));
        assert!(api.calls().is_empty());
    }
}
