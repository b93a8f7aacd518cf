use async_trait::async_trait;

use refadmin_core::domain::OPTIONS_PER_QUESTION;
use refadmin_core::quiz::{POST_FAILED, POSTED, QuizDraft};

use super::render::heading;
use super::{CommandHelp, Reply, View, parse_position, split_word};
use crate::router::Route;
use crate::state::AppState;

const COMMANDS: &[CommandHelp] = &[
    ("name <text>", "Quiz name"),
    ("category <text>", "Category"),
    ("difficulty <text>", "Difficulty (Easy, Medium, Hard)"),
    ("live <timestamp>", "Live at, e.g. 2024-05-01T18:30"),
    ("add", "Append a question"),
    ("rm <id>", "Remove a question"),
    ("q <id> <text>", "Question text"),
    ("opt <id> <1-4> <text>", "Option text"),
    ("correct <id> <1-4|none>", "Mark the correct option"),
    ("earn <id> <amount>", "Earnings for the question"),
    ("json", "Print the payload that would be posted"),
    ("submit", "Post the quiz"),
];

pub struct QuizFormView {
    draft: QuizDraft,
}

impl QuizFormView {
    pub fn new() -> Self {
        Self {
            draft: QuizDraft::new(),
        }
    }

    fn edit_question(&mut self, command: &str, args: &str) -> Reply {
        let (id, rest) = split_word(args);
        let Ok(id) = id.parse::<u32>() else {
            return Reply::Usage(usage(command));
        };
        let found = match command {
            "rm" => self.draft.remove_question(id),
            "q" => self.draft.set_text(id, rest),
            "earn" => self.draft.set_earnings(id, rest),
            "opt" => {
                let (option, text) = split_word(rest);
                match parse_position(option) {
                    Some(option) if option < OPTIONS_PER_QUESTION => {
                        self.draft.set_option(id, option, text)
                    }
                    _ => return Reply::Usage(usage(command)),
                }
            }
            "correct" => {
                let option = if rest.eq_ignore_ascii_case("none") {
                    None
                } else {
                    match parse_position(rest) {
                        Some(option) => Some(option),
                        None => return Reply::Usage(usage(command)),
                    }
                };
                self.draft.set_correct_option(id, option)
            }
            _ => return Reply::Unknown,
        };
        if found {
            Reply::Updated
        } else {
            Reply::Alert(format!("No question with id {id}."))
        }
    }
}

fn usage(command: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(usage, _)| usage.split_whitespace().next() == Some(command))
        .map(|(usage, _)| *usage)
        .unwrap_or("help")
}

#[async_trait]
impl View for QuizFormView {
    fn route(&self) -> Route {
        Route::QuizForm
    }

    fn commands(&self) -> &'static [CommandHelp] {
        COMMANDS
    }

    async fn handle(&mut self, state: &AppState, command: &str, args: &str) -> Reply {
        match command {
            "name" => self.draft.name = args.to_string(),
            "category" => self.draft.category = args.to_string(),
            "difficulty" => self.draft.difficulty = args.to_string(),
            "live" => self.draft.live_at = args.to_string(),
            "add" => {
                self.draft.add_question();
            }
            "rm" | "q" | "opt" | "correct" | "earn" => return self.edit_question(command, args),
            "json" => {
                return match self.draft.build() {
                    Ok(submission) => match serde_json::to_string_pretty(&submission) {
                        Ok(json) => Reply::Alert(json),
                        Err(e) => Reply::Alert(e.to_string()),
                    },
                    Err(e) => Reply::Alert(e.to_string()),
                };
            }
            "submit" => {
                let submission = match self.draft.build() {
                    Ok(submission) => submission,
                    Err(e) => return Reply::Alert(e.to_string()),
                };
                return match state.api.post_quiz(&submission).await {
                    Ok(response) => {
                        tracing::info!(quiz = %submission.name, response = %response, "Quiz posted");
                        Reply::Alert(POSTED.to_string())
                    }
                    Err(e) => {
                        tracing::error!(quiz = %submission.name, error = %e, "Posting quiz failed");
                        Reply::Alert(POST_FAILED.to_string())
                    }
                };
            }
            _ => return Reply::Unknown,
        }
        Reply::Updated
    }

    fn render(&self) -> String {
        let draft = &self.draft;
        let mut out = heading("Quiz Data Entry Form");
        out.push_str(&format!("Quiz Name:  {}\n", draft.name));
        out.push_str(&format!("Category:   {}\n", draft.category));
        out.push_str(&format!("Difficulty: {}\n", draft.difficulty));
        out.push_str(&format!("Live At:    {}\n", draft.live_at));

        if draft.questions().is_empty() {
            out.push_str("\nNo questions yet (add).\n");
        }
        for (n, question) in draft.questions().iter().enumerate() {
            out.push_str(&format!(
                "\nQuestion {} [id {}]: {}\n",
                n + 1,
                question.id,
                question.question
            ));
            for (i, option) in question.options.iter().enumerate() {
                let mark = if question.correct_option_index == Some(i) {
                    "(x)"
                } else {
                    "( )"
                };
                out.push_str(&format!("  {mark} {}. {option}\n", i + 1));
            }
            out.push_str(&format!("  Earnings: {}\n", question.earnings));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use refadmin_core::ApiError;
    use refadmin_core::testing::{ApiCall, RecordingApi};
    use serde_json::json;

    use super::*;

    async fn authored(state: &AppState) -> QuizFormView {
        let mut view = QuizFormView::new();
        for (command, args) in [
            ("name", "Weekly"),
            ("category", "General"),
            ("difficulty", "Easy"),
            ("live", "2024-05-01T18:30"),
            ("add", ""),
            ("q", "1 Capital of France?"),
            ("opt", "1 1 Berlin"),
            ("opt", "1 2 Madrid"),
            ("opt", "1 3 Paris"),
            ("opt", "1 4 Rome"),
            ("earn", "1 10"),
        ] {
            view.handle(state, command, args).await;
        }
        view
    }

    #[tokio::test]
    async fn test_missing_correct_option_alerts_with_question_number() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = authored(&state).await;

        let reply = view.handle(&state, "submit", "").await;

        assert_eq!(
            reply,
            Reply::Alert("Please select a correct option for Question 1.".into())
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_posts_answers_by_text() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = authored(&state).await;
        view.handle(&state, "correct", "1 3").await;

        let reply = view.handle(&state, "submit", "").await;

        assert_eq!(reply, Reply::Alert(POSTED.into()));
        let calls = api.calls();
        let ApiCall::PostQuiz(payload) = &calls[0] else {
            panic!("expected a quiz post, got {calls:?}");
        };
        assert_eq!(payload["answers"], json!({ "q1": "Paris" }));
        assert_eq!(payload["metadata"]["earnings"], json!([10]));
        assert_eq!(payload["live_at_date"], json!("2024-05-01T18:30:00.000Z"));
    }

    #[tokio::test]
    async fn test_invalid_date_alert() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api).await;
        let mut view = authored(&state).await;
        view.handle(&state, "live", "soon").await;

        assert_eq!(
            view.handle(&state, "submit", "").await,
            Reply::Alert("Invalid date format. Please enter a valid date.".into())
        );
    }

    #[tokio::test]
    async fn test_post_failure_alert() {
        let api = Arc::new(RecordingApi::new());
        api.fail("quiz", ApiError::Network("down".into()));
        let state = AppState::for_tests(api).await;
        let mut view = authored(&state).await;
        view.handle(&state, "correct", "1 2").await;

        assert_eq!(
            view.handle(&state, "submit", "").await,
            Reply::Alert(POST_FAILED.into())
        );
    }

    #[tokio::test]
    async fn test_option_out_of_range_and_unknown_question() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api).await;
        let mut view = authored(&state).await;

        assert_eq!(
            view.handle(&state, "opt", "1 5 Lisbon").await,
            Reply::Usage("opt <id> <1-4> <text>")
        );
        assert_eq!(
            view.handle(&state, "q", "9 Missing").await,
            Reply::Alert("No question with id 9.".into())
        );
    }

    #[tokio::test]
    async fn test_json_preview_does_not_post() {
        let api = Arc::new(RecordingApi::new());
        let state = AppState::for_tests(api.clone()).await;
        let mut view = authored(&state).await;
        view.handle(&state, "correct", "1 3").await;

        let Reply::Alert(json) = view.handle(&state, "json", "").await else {
            panic!("expected payload preview");
        };

        assert!(json.contains("\"q1\": \"Paris\""));
        assert!(api.calls().is_empty());
        assert!(view.render().contains("(x) 3. Paris"));
    }
}
