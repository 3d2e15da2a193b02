use std::time::{Duration, SystemTime};

use rand::Rng;

use crate::quiz::{hint, Hint, Question, QuestionBank, QuizError, QuizMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WrongAnswer {
    /// 1-based
    pub round: usize,
    pub question: String,
    pub chosen: String,
    pub correct: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub is_correct: bool,
    pub correct_answer: String,
    pub score: usize,
    pub streak: usize,
    /// The session completed with this answer.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSummary {
    pub mode: QuizMode,
    pub target_count: usize,
    pub score: usize,
    pub total_answered: usize,
    pub skipped: usize,
    pub best_streak: usize,
    pub elapsed: Duration,
    pub wrong_log: Vec<WrongAnswer>,
}

impl SessionSummary {
    pub fn is_perfect(&self) -> bool {
        self.score == self.target_count
    }
}

/// One player's run through a fixed number of rounds.
///
/// The session owns its bank, so independent players never share cycle state.
/// It is a plain value: whoever drives it keeps it between rounds.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    bank: QuestionBank,
    mode: QuizMode,
    target_count: usize,
    index: usize,
    score: usize,
    total_answered: usize,
    skipped: usize,
    streak: usize,
    best_streak: usize,
    started_at: Option<SystemTime>,
    elapsed: Option<Duration>,
    wrong_log: Vec<WrongAnswer>,
    current: Option<Question>,
    state: SessionState,
}

impl QuizSession {
    pub fn new(bank: QuestionBank, mode: QuizMode, target_count: usize) -> Result<Self, QuizError> {
        if target_count == 0 {
            return Err(QuizError::InvalidTargetCount);
        }
        Ok(Self {
            bank,
            mode,
            target_count,
            index: 0,
            score: 0,
            total_answered: 0,
            skipped: 0,
            streak: 0,
            best_streak: 0,
            started_at: None,
            elapsed: None,
            wrong_log: Vec::new(),
            current: None,
            state: SessionState::NotStarted,
        })
    }

    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Question, QuizError> {
        if self.state != SessionState::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        self.started_at = Some(SystemTime::now());
        self.state = SessionState::InProgress;
        let direction = self.mode.direction(rng);
        Ok(self.current.insert(self.bank.next(direction, rng)))
    }

    /// Scores `chosen` against the current question by exact string equality.
    /// Normalizing user input is up to the caller.
    pub fn submit_answer<R: Rng + ?Sized>(
        &mut self,
        chosen: &str,
        rng: &mut R,
    ) -> Result<RoundResult, QuizError> {
        let question = self.take_current()?;
        let is_correct = question.is_correct(chosen);

        self.total_answered += 1;
        if is_correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
            self.wrong_log.push(WrongAnswer {
                round: self.index + 1,
                question: question.prompt,
                chosen: chosen.to_string(),
                correct: question.correct.clone(),
            });
        }

        let completed = self.advance(rng);
        Ok(RoundResult {
            is_correct,
            correct_answer: question.correct,
            score: self.score,
            streak: self.streak,
            completed,
        })
    }

    /// Moves past the current question without answering it. Returns whether
    /// the session completed.
    pub fn skip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, QuizError> {
        self.take_current()?;
        self.skipped += 1;
        Ok(self.advance(rng))
    }

    pub fn hint(&self) -> Result<Hint, QuizError> {
        self.ensure_in_progress()?;
        let question = self.current.as_ref().ok_or(QuizError::NotStarted)?;
        Ok(hint::hint_for(question))
    }

    pub fn summary(&self) -> Result<SessionSummary, QuizError> {
        if self.state != SessionState::Completed {
            return Err(QuizError::NotCompleted);
        }
        Ok(SessionSummary {
            mode: self.mode,
            target_count: self.target_count,
            score: self.score,
            total_answered: self.total_answered,
            skipped: self.skipped,
            best_streak: self.best_streak,
            elapsed: self.elapsed.unwrap_or_default(),
            wrong_log: self.wrong_log.clone(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number of the round being played.
    pub fn round(&self) -> usize {
        (self.index + 1).min(self.target_count)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total_answered(&self) -> usize {
        self.total_answered
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    pub fn wrong_log(&self) -> &[WrongAnswer] {
        &self.wrong_log
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Fraction of rounds played, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.index as f64 / self.target_count as f64
    }

    fn ensure_in_progress(&self) -> Result<(), QuizError> {
        match self.state {
            SessionState::NotStarted => Err(QuizError::NotStarted),
            SessionState::InProgress => Ok(()),
            SessionState::Completed => Err(QuizError::AlreadyCompleted),
        }
    }

    // All checks happen here, before anything is mutated.
    fn take_current(&mut self) -> Result<Question, QuizError> {
        self.ensure_in_progress()?;
        self.current.take().ok_or(QuizError::NotStarted)
    }

    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.index += 1;
        if self.index >= self.target_count {
            self.state = SessionState::Completed;
            self.elapsed = Some(
                self.started_at
                    .and_then(|started| started.elapsed().ok())
                    .unwrap_or_default(),
            );
            return true;
        }
        let direction = self.mode.direction(rng);
        self.current = Some(self.bank.next(direction, rng));
        false
    }
}
