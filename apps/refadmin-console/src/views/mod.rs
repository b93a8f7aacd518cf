//! Page views.
//!
//! Each view owns the state of one page, reacts to shell commands and
//! renders itself as text. Views are mounted fresh on every navigation.

mod change_referral;
mod listing;
mod login;
mod quiz_form;
mod referrer_stats;
mod render;
mod send_notification;
mod user_data;
mod user_referrals;

use async_trait::async_trait;

use refadmin_core::domain::{Profile, UserReferral};

use crate::router::Route;
use crate::state::AppState;

pub use change_referral::ChangeReferralView;
pub use listing::ListingView;
pub use login::LoginView;
pub use quiz_form::QuizFormView;
pub use referrer_stats::ReferrerStatsView;
pub use send_notification::SendNotificationView;

/// `(usage, description)` of a view command, listed by `help`.
pub type CommandHelp = (&'static str, &'static str);

/// What the shell does after a view handled a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// State changed; re-render.
    Updated,
    /// Blocking message shown before the re-render.
    Alert(String),
    Navigate(&'static str),
    /// Arguments did not parse; show the usage line.
    Usage(&'static str),
    Unknown,
}

#[async_trait]
pub trait View: Send {
    fn route(&self) -> Route;

    fn commands(&self) -> &'static [CommandHelp];

    /// Called once after mounting.
    async fn enter(&mut self, _state: &AppState) {}

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply;

    fn render(&self) -> String;
}

pub fn mount(route: Route) -> Box<dyn View> {
    match route {
        Route::Login => Box::new(LoginView::new()),
        Route::UserReferrals => Box::new(ListingView::<UserReferral>::new()),
        Route::UserData => Box::new(ListingView::<Profile>::new()),
        Route::ChangeReferralCode => Box::new(ChangeReferralView::new()),
        Route::SendNotification => Box::new(SendNotificationView::new()),
        Route::QuizForm => Box::new(QuizFormView::new()),
        Route::ReferrerStats => Box::new(ReferrerStatsView::new()),
    }
}

/// Split `"<first> <rest>"`, trimming both halves.
pub fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (input, ""),
    }
}

/// Parse a 1-based position into a 0-based index.
pub fn parse_position(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_word() {
        assert_eq!(split_word("  title  Hello there "), ("title", "Hello there"));
        assert_eq!(split_word("send"), ("send", ""));
        assert_eq!(split_word(""), ("", ""));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1"), Some(0));
        assert_eq!(parse_position(" 3 "), Some(2));
        assert_eq!(parse_position("0"), None);
        assert_eq!(parse_position("x"), None);
    }

    #[test]
    fn test_mount_matches_route() {
        for route in [
            Route::Login,
            Route::UserReferrals,
            Route::UserData,
            Route::ChangeReferralCode,
            Route::SendNotification,
            Route::QuizForm,
            Route::ReferrerStats,
        ] {
            assert_eq!(mount(route).route(), route);
        }
    }
}
