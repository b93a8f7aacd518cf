use serde::{Deserialize, Serialize};

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A quiz question as authored and as sent in the `questions` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub options: Vec<String>,
    pub earnings: i64,
    pub question: String,
    pub correct_option_index: Option<usize>,
}

impl QuizQuestion {
    /// A blank question with four empty options.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            options: vec![String::new(); OPTIONS_PER_QUESTION],
            earnings: 0,
            question: String::new(),
            correct_option_index: None,
        }
    }

    /// Text of the selected correct option, if the selection is in bounds.
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_option_index
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }
}
