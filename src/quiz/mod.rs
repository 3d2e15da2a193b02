pub mod bank;
pub mod dataset;
pub mod hint;
pub mod session;

use rand::Rng;

pub use bank::QuestionBank;
pub use hint::Hint;
pub use session::{QuizSession, RoundResult, SessionState, SessionSummary, WrongAnswer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VocabularyPair {
    pub key: String,
    pub value: String,
}

impl VocabularyPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns `(prompt, answer)` for the given direction.
    pub fn split(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::KeyToValue => (&self.key, &self.value),
            Direction::ValueToKey => (&self.value, &self.key),
        }
    }

    pub fn answer(&self, direction: Direction) -> &str {
        self.split(direction).1
    }
}

/// Which side of a pair is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    KeyToValue,
    ValueToKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizMode {
    KeyToValue,
    ValueToKey,
    /// Direction is picked per question.
    Mixed,
}

impl QuizMode {
    pub fn direction<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            QuizMode::KeyToValue => Direction::KeyToValue,
            QuizMode::ValueToKey => Direction::ValueToKey,
            QuizMode::Mixed => {
                if rng.gen_bool(0.5) {
                    Direction::KeyToValue
                } else {
                    Direction::ValueToKey
                }
            }
        }
    }
}

/// A single generated question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub direction: Direction,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl Question {
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("the question pool is empty")]
    EmptyPool,
    #[error("a session needs at least one question")]
    InvalidTargetCount,
    #[error("the session has already been started")]
    AlreadyStarted,
    #[error("the session has not been started yet")]
    NotStarted,
    #[error("the session is already completed")]
    AlreadyCompleted,
    #[error("the session is not completed yet")]
    NotCompleted,
}
