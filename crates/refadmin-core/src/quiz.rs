//! Quiz authoring: draft editing, validation and payload construction.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::domain::QuizQuestion;
use crate::error::QuizError;

pub const POSTED: &str = "Quiz posted successfully!";
pub const POST_FAILED: &str = "Failed to post quiz. Please try again.";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// `metadata` block of the quiz payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizMetadata {
    pub category: String,
    pub difficulty: String,
    pub earnings: Vec<i64>,
}

/// The body posted to `/admin/quizForm/quiz`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSubmission {
    pub name: String,
    pub questions: Vec<QuizQuestion>,
    /// `"q1"`, `"q2"`, ... -> text of the correct option.
    pub answers: BTreeMap<String, String>,
    pub metadata: QuizMetadata,
    #[serde(serialize_with = "iso_millis")]
    pub live_at_date: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse the live timestamp. Offsets are honoured; naive input keeps its
/// wall-clock digits as UTC.
pub fn parse_live_at(input: &str) -> Result<DateTime<Utc>, QuizError> {
    let trimmed = input.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| QuizError::InvalidLiveAt(input.to_string()))
}

/// The quiz being authored.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub name: String,
    pub category: String,
    pub difficulty: String,
    pub live_at: String,
    questions: Vec<QuizQuestion>,
    next_id: u32,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            difficulty: String::new(),
            live_at: String::new(),
            questions: Vec::new(),
            next_id: 1,
        }
    }
}

impl QuizDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Append a blank question. Ids are never reused.
    pub fn add_question(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.questions.push(QuizQuestion::new(id));
        id
    }

    pub fn remove_question(&mut self, id: u32) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);
        before != self.questions.len()
    }

    pub fn question_mut(&mut self, id: u32) -> Option<&mut QuizQuestion> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    pub fn set_text(&mut self, id: u32, text: &str) -> bool {
        self.question_mut(id)
            .map(|q| q.question = text.to_string())
            .is_some()
    }

    /// `option` is 0-based.
    pub fn set_option(&mut self, id: u32, option: usize, text: &str) -> bool {
        match self.question_mut(id).and_then(|q| q.options.get_mut(option)) {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }

    /// `None` clears the selection. Out-of-range indices are stored and
    /// rejected at submit.
    pub fn set_correct_option(&mut self, id: u32, option: Option<usize>) -> bool {
        self.question_mut(id)
            .map(|q| q.correct_option_index = option)
            .is_some()
    }

    /// Unparseable earnings become 0.
    pub fn set_earnings(&mut self, id: u32, input: &str) -> bool {
        let earnings = input.trim().parse::<i64>().unwrap_or(0);
        self.question_mut(id).map(|q| q.earnings = earnings).is_some()
    }

    /// Validate and build the payload. The date is checked before the
    /// questions.
    pub fn build(&self) -> Result<QuizSubmission, QuizError> {
        let live_at_date = parse_live_at(&self.live_at)?;

        let mut answers = BTreeMap::new();
        for (idx, question) in self.questions.iter().enumerate() {
            let answer = question
                .correct_option()
                .ok_or(QuizError::MissingCorrectOption { question: idx + 1 })?;
            answers.insert(format!("q{}", idx + 1), answer.to_string());
        }

        Ok(QuizSubmission {
            name: self.name.clone(),
            questions: self.questions.clone(),
            answers,
            metadata: QuizMetadata {
                category: self.category.clone(),
                difficulty: self.difficulty.clone(),
                earnings: self.questions.iter().map(|q| q.earnings).collect(),
            },
            live_at_date,
        })
    }
}
