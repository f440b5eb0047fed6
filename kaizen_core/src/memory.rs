//! Number memory game.
//!
//! A session moves through `Idle -> Memorize -> Recalling -> Complete`.
//! The sequence is handed out exactly once by [`MemoryGame::reveal`]; after
//! that the game only reports whether each recall matched its position,
//! until the session is over.

use crate::{validate, AnswerPolicy, Error, GameScore, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

/// Generated numbers are drawn from 0..=MAX_NUMBER
pub const MAX_NUMBER: u32 = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MemoryPhase {
    Idle,
    Memorize,
    Recalling,
    Complete,
    Aborted,
}

/// Outcome of one recall attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RecallOutcome {
    /// Zero-based position in the sequence
    pub position: usize,
    pub recalled: i64,
    pub correct: bool,
}

pub struct MemoryGame<R = StdRng> {
    rng: R,
    policy: AnswerPolicy,
    session_id: Option<Uuid>,
    sequence: Vec<u32>,
    recalls: Vec<RecallOutcome>,
    phase: MemoryPhase,
}

impl MemoryGame<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for MemoryGame<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MemoryGame<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            policy: AnswerPolicy::default(),
            session_id: None,
            sequence: Vec::new(),
            recalls: Vec::new(),
            phase: MemoryPhase::Idle,
        }
    }

    pub fn with_policy(mut self, policy: AnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generate `count` numbers to memorize, discarding any session in progress
    ///
    /// `count` is limited to [`validate::MAX_COUNT`].
    pub fn start(&mut self, count: i64) -> Result<()> {
        let count = validate::check_count(count)?;
        let sequence: Vec<u32> = (0..count)
            .map(|_| self.rng.gen_range(0..=MAX_NUMBER))
            .collect();
        self.begin(sequence);
        Ok(())
    }

    /// Start a session over a fixed sequence
    pub fn start_with(&mut self, sequence: Vec<u32>) -> Result<()> {
        if sequence.is_empty() {
            return Err(Error::InvalidCount("no numbers supplied".into()));
        }
        if let Some(n) = sequence.iter().find(|&&n| n > MAX_NUMBER) {
            return Err(Error::InvalidInput(format!(
                "{} is outside 0..={}",
                n, MAX_NUMBER
            )));
        }
        self.begin(sequence);
        Ok(())
    }

    fn begin(&mut self, sequence: Vec<u32>) {
        let id = Uuid::new_v4();
        tracing::info!("Memory session {} started with {} numbers", id, sequence.len());

        self.session_id = Some(id);
        self.sequence = sequence;
        self.recalls.clear();
        self.phase = MemoryPhase::Memorize;
    }

    /// Hand out the sequence to memorize; only allowed once per session
    pub fn reveal(&mut self) -> Result<Vec<u32>> {
        if self.phase != MemoryPhase::Memorize {
            return Err(Error::State(format!(
                "sequence can only be revealed once, before recall ({:?})",
                self.phase
            )));
        }
        self.phase = MemoryPhase::Recalling;
        Ok(self.sequence.clone())
    }

    /// Compare a recalled number against the next position in the sequence
    pub fn submit_recall(&mut self, raw: &str) -> Result<RecallOutcome> {
        if self.phase != MemoryPhase::Recalling {
            return Err(Error::State(format!(
                "not accepting recalls ({:?})",
                self.phase
            )));
        }

        let recalled = match validate::answer(raw) {
            Ok(value) => value,
            Err(e) => {
                if self.policy == AnswerPolicy::AbortSession {
                    self.phase = MemoryPhase::Aborted;
                    tracing::warn!(
                        "Memory session aborted after {} of {} recalls: {}",
                        self.recalls.len(),
                        self.sequence.len(),
                        e
                    );
                }
                return Err(e);
            }
        };

        let position = self.recalls.len();
        let outcome = RecallOutcome {
            position,
            recalled,
            correct: i64::from(self.sequence[position]) == recalled,
        };
        tracing::debug!("Recall {}: {} ({})", position + 1, recalled, outcome.correct);
        self.recalls.push(outcome);

        if self.recalls.len() == self.sequence.len() {
            self.phase = MemoryPhase::Complete;
            tracing::info!("Memory session complete: {}", self.score());
        }

        Ok(outcome)
    }

    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Number of values to memorize in the current session
    pub fn count(&self) -> u32 {
        self.sequence.len() as u32
    }

    pub fn recalls(&self) -> &[RecallOutcome] {
        &self.recalls
    }

    pub fn correct_count(&self) -> u32 {
        self.recalls.iter().filter(|r| r.correct).count() as u32
    }

    pub fn score(&self) -> GameScore {
        GameScore {
            correct: self.correct_count(),
            answered: self.recalls.len() as u32,
            total: self.count(),
        }
    }

    /// Final score once the session is complete or aborted
    pub fn summary(&self) -> Option<GameScore> {
        match self.phase {
            MemoryPhase::Complete | MemoryPhase::Aborted => Some(self.score()),
            _ => None,
        }
    }

    /// The memorized sequence, available again only after the session ends
    pub fn answer_key(&self) -> Option<&[u32]> {
        match self.phase {
            MemoryPhase::Complete | MemoryPhase::Aborted => Some(&self.sequence),
            _ => None,
        }
    }
}
