use std::{fmt, str::FromStr};

use serde::Serialize;

pub type Questions = Vec<Question>;

/// Options used for a true/false question that does not list its own.
pub const DEFAULT_TRUE_FALSE_OPTIONS: [&str; 2] = ["Verdadeiro", "Falso"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    MultipleChoice,
    TrueFalse,
}

/// Multiple choice questions point at an option by index, true/false
/// questions carry the text of the correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Index(usize),
    Text(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown question kind '{}'", self.0)
    }
}

impl FromStr for QuestionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple_choice" | "multipla_escolha" => Ok(QuestionKind::MultipleChoice),
            "true_false" | "verdadeiro_falso" => Ok(QuestionKind::TrueFalse),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

impl Question {
    pub fn is_true_false(&self) -> bool {
        self.kind == QuestionKind::TrueFalse
    }

    /// Position of the correct option, if the answer names one of the options.
    pub fn correct_option(&self) -> Option<usize> {
        match &self.correct_answer {
            CorrectAnswer::Index(idx) => Some(*idx).filter(|idx| *idx < self.options.len()),
            CorrectAnswer::Text(text) => self.options.iter().position(|o| o == text),
        }
    }

    pub fn correct_text(&self) -> &str {
        match &self.correct_answer {
            CorrectAnswer::Index(idx) => self.options.get(*idx).map(String::as_str).unwrap_or_default(),
            CorrectAnswer::Text(text) => text,
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        match &self.correct_answer {
            CorrectAnswer::Index(idx) => *idx == option,
            CorrectAnswer::Text(text) => self.options.get(option).is_some_and(|o| o == text),
        }
    }
}
