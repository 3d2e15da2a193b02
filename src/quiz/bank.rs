use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::{Direction, Question, QuizError, VocabularyPair};

/// Wrong options shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;
const DISTRACTOR_ATTEMPTS: usize = 200;

/// Fixed pool of pairs plus the position in the current exhaustion cycle.
///
/// Every pair is asked once per cycle; when the cycle runs out the order is
/// reshuffled, so sessions can be longer than the pool.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuestionBank {
    pairs: Vec<VocabularyPair>,
    order: Vec<usize>,
    cursor: usize,
}

impl QuestionBank {
    pub fn new(pairs: Vec<VocabularyPair>) -> Result<Self, QuizError> {
        // Pair is the unit of identity, so duplicates would be asked twice per cycle
        let mut unique: Vec<VocabularyPair> = Vec::with_capacity(pairs.len());
        for pair in pairs {
            if !unique.contains(&pair) {
                unique.push(pair);
            }
        }
        if unique.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let order = (0..unique.len()).collect::<Vec<_>>();
        let cursor = order.len();
        Ok(Self {
            pairs: unique,
            order,
            cursor,
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[VocabularyPair] {
        &self.pairs
    }

    pub fn next<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Question {
        if self.cursor >= self.order.len() {
            self.order.shuffle(rng);
            self.cursor = 0;
        }
        let pair = &self.pairs[self.order[self.cursor]];
        self.cursor += 1;

        let (prompt, correct) = pair.split(direction);
        let mut options = self.distractors(correct, direction, rng);
        options.push(correct.to_string());
        // Fresh shuffle on every call so the correct answer has no favourite slot
        options.shuffle(rng);

        Question {
            direction,
            prompt: prompt.to_string(),
            options,
            correct: correct.to_string(),
        }
    }

    /// Draws from the whole pool, used or not. Gives up after a fixed number of
    /// attempts, which only matters for pools with fewer than four distinct answers.
    fn distractors<R: Rng + ?Sized>(
        &self,
        correct: &str,
        direction: Direction,
        rng: &mut R,
    ) -> Vec<String> {
        let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
        let mut attempts = 0;
        while picked.len() < DISTRACTOR_COUNT && attempts < DISTRACTOR_ATTEMPTS {
            attempts += 1;
            let candidate = self.pairs[rng.gen_range(0..self.pairs.len())].answer(direction);
            if candidate == correct || picked.iter().any(|p| p == candidate) {
                continue;
            }
            picked.push(candidate.to_string());
        }
        picked
    }
}
