//! Quiz collaborators producing multiple-choice questions about a puzzle subject
//!
//! By convention a quiz service never fails loudly: any problem yields an
//! empty question list and the caller decides how to report it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::io::configuration::{QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT};

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Answer options, exactly four
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_index: usize,
    /// Explanation shown after answering
    pub explanation: String,
}

impl QuizQuestion {
    /// Whether the question has four options and a correct index among them
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == QUIZ_OPTION_COUNT && self.correct_index < QUIZ_OPTION_COUNT
    }
}

/// Source of quiz questions
pub trait QuizService {
    /// Generate exactly three questions about `subject`
    ///
    /// Returns an empty list on any failure.
    fn generate_quiz(&mut self, subject: &str) -> Vec<QuizQuestion>;
}

impl<Q: QuizService + ?Sized> QuizService for Box<Q> {
    fn generate_quiz(&mut self, subject: &str) -> Vec<QuizQuestion> {
        (**self).generate_quiz(subject)
    }
}

/// Keep a question list only if it has the expected shape
///
/// Returns an empty list unless there are exactly three well-formed questions.
pub fn validate_questions(questions: Vec<QuizQuestion>) -> Vec<QuizQuestion> {
    if questions.len() == QUIZ_QUESTION_COUNT && questions.iter().all(QuizQuestion::is_well_formed)
    {
        questions
    } else {
        tracing::warn!(count = questions.len(), "discarding malformed quiz");
        Vec::new()
    }
}

/// Key in a question bank that answers for any subject
pub const ANY_SUBJECT: &str = "*";

/// Quiz service backed by a JSON question bank
///
/// The bank maps a subject (matched case-insensitively) to its questions;
/// the `"*"` entry serves subjects without their own questions.
#[derive(Debug, Clone)]
pub struct FileQuizService {
    path: PathBuf,
}

impl FileQuizService {
    /// Read questions from the bank at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_bank(&self) -> Option<HashMap<String, Vec<QuizQuestion>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "quiz bank unreadable");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(bank) => Some(bank),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "quiz bank malformed");
                None
            }
        }
    }
}

impl QuizService for FileQuizService {
    fn generate_quiz(&mut self, subject: &str) -> Vec<QuizQuestion> {
        let Some(mut bank) = self.load_bank() else {
            return Vec::new();
        };
        let wanted = subject.trim().to_lowercase();
        let key = bank
            .keys()
            .find(|key| key.to_lowercase() == wanted)
            .cloned()
            .unwrap_or_else(|| ANY_SUBJECT.to_string());
        bank.remove(&key)
            .map(validate_questions)
            .unwrap_or_default()
    }
}

/// Quiz service that never has questions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuiz;

impl QuizService for NoQuiz {
    fn generate_quiz(&mut self, _subject: &str) -> Vec<QuizQuestion> {
        Vec::new()
    }
}
