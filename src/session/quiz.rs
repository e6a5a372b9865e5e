//! Progress through one round of subject quiz questions

use crate::services::quiz::QuizQuestion;

/// Outcome of answering the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// Whether the chosen option was correct
    pub correct: bool,
    /// Index of the correct option
    pub correct_index: usize,
    /// Explanation of the answer
    pub explanation: String,
}

/// Where the round stands after moving on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    /// Another question is now current
    Next {
        /// Zero-based index of the new current question
        index: usize,
    },
    /// All questions have been answered
    Complete {
        /// Number of correct answers
        score: usize,
    },
}

/// One quiz round: questions, the current position and the running score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    score: usize,
}

impl QuizRound {
    /// Begin a round; returns `None` when there are no questions
    pub fn new(questions: Vec<QuizQuestion>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
        })
    }

    /// Question being shown
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// Zero-based index of the current question
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions in the round
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the round has no questions (never true for a constructed round)
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Correct answers so far
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Option chosen for the current question, if answered
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Answer the current question
    ///
    /// Only the first answer per question counts; later calls return `None`.
    pub fn answer(&mut self, option: usize) -> Option<AnswerFeedback> {
        if self.selected.is_some() {
            return None;
        }
        let question = self.questions.get(self.current)?;
        if option >= question.options.len() {
            return None;
        }

        let correct = option == question.correct_index;
        let feedback = AnswerFeedback {
            correct,
            correct_index: question.correct_index,
            explanation: question.explanation.clone(),
        };
        self.selected = Some(option);
        if correct {
            self.score += 1;
        }
        Some(feedback)
    }

    /// Move past the current question
    ///
    /// Returns `None` while the current question is still unanswered.
    pub fn advance(&mut self) -> Option<QuizProgress> {
        self.selected?;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            Some(QuizProgress::Next {
                index: self.current,
            })
        } else {
            Some(QuizProgress::Complete { score: self.score })
        }
    }
}
