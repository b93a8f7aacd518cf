use async_trait::async_trait;

use refadmin_core::stats::{StatsState, fetch_referrer_stats};

use super::render::{bar_chart, heading};
use super::{CommandHelp, Reply, View};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("user <username>", "Referrer to inspect; loads their stats"),
    ("fetch", "Reload the referrer's stats"),
];

pub struct ReferrerStatsView {
    stats: StatsState,
}

impl ReferrerStatsView {
    pub fn new() -> Self {
        Self {
            stats: StatsState::new(),
        }
    }

    /// Start a refresh for the current username and apply its result.
    async fn refresh(&mut self, state: &AppState) {
        let Some(request) = self.stats.begin() else {
            return;
        };
        let result = fetch_referrer_stats(state.api.as_ref(), &request.username).await;
        self.stats.complete(&request, result);
    }
}

#[async_trait]
impl View for ReferrerStatsView {
    fn route(&self) -> Route {
        Route::ReferrerStats
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        match command {
            "user" => {
                let username = args.trim();
                if username != self.stats.username {
                    self.stats.username = username.to_string();
                    self.refresh(state).await;
                }
            }
            "fetch" => {
                if !self.stats.can_fetch() {
                    return Reply::Alert("Enter a username first.".to_string());
                }
                self.refresh(state).await;
            }
            _ => return Reply::Unknown,
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let mut out = heading("Referrer Stats");
        out.push_str(&format!("Username: {}\n", self.stats.username));
        out.push_str(if self.stats.is_loading() {
            "Loading...\n"
        } else {
            "[fetch]\n"
        });
        if let Some(error) = self.stats.error() {
            out.push_str(&format!("! {error}\n"));
        }

        if let Some((username, stats)) = self.stats.stats() {
            out.push_str(&format!("\nStatistics for {username}\n"));
            out.push_str(&format!("Total Referrals: {}\n\n", stats.total_referrals()));

            let by_date: Vec<(String, u64)> = stats
                .referred_count_by_date
                .iter()
                .map(|row| (row.referral_date.clone(), row.referred_count))
                .collect();
            out.push_str(&bar_chart("Referred Count by Date", &by_date));
            out.push('\n');

            let purchases: Vec<(String, u64)> = stats
                .purchase_count
                .iter()
                .map(|row| (row.reward_title.clone(), row.purchase_count))
                .collect();
            out.push_str(&bar_chart("Purchase Count", &purchases));
            out.push_str(&format!("\nDeleted Count: {}\n", stats.deleted_count));
        }
        out
    }
}
