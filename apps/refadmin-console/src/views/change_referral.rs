use async_trait::async_trait;

use refadmin_core::referral::ReferralCodeForm;

use super::render::heading;
use super::{CommandHelp, Reply, View};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("user <id>", "User whose code changes"),
    ("code <new code>", "New referral code (sent lower-cased)"),
    ("submit", "Update the referral code"),
];

pub struct ChangeReferralView {
    form: ReferralCodeForm,
}

impl ChangeReferralView {
    pub fn new() -> Self {
        Self {
            form: ReferralCodeForm::new(),
        }
    }
}

#[async_trait]
impl View for ChangeReferralView {
    fn route(&self) -> Route {
        Route::ChangeReferralCode
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        match command {
            "user" => self.form.user_id = args.to_string(),
            "code" => self.form.new_code = args.to_string(),
            "submit" => {
                if self.form.submit(state.api.as_ref()).await.is_none() {
                    return Reply::Alert("User ID and new referral code are required.".to_string());
                }
            }
            _ => return Reply::Unknown,
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let mut out = heading("Change Referral Code");
        out.push_str(&format!("User ID:           {}\n", self.form.user_id));
        out.push_str(&format!("New Referral Code: {}\n", self.form.new_code));
        if let Some(message) = self.form.message() {
            let marker = if self.form.is_error() { "!" } else { "*" };
            out.push_str(&format!("{marker} {message}\n"));
        }
        out
    }
}
