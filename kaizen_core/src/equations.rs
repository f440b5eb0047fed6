//! Arithmetic drill: random two-operand problems scored one answer at a time.
//!
//! Session phases:
//! - `Idle` until [`EquationGame::start`]
//! - `AwaitingAnswer` while rounds remain
//! - `Complete` after the last round is scored
//! - `Aborted` when an unparseable answer ends the session under
//!   [`AnswerPolicy::AbortSession`]

use crate::{validate, AnswerPolicy, Error, GameScore, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

/// Smallest generated operand
pub const OPERAND_MIN: i32 = 1;

/// Largest generated operand
pub const OPERAND_MAX: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

/// One generated problem with its expected answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EquationProblem {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operator: Operator,
    pub correct_answer: i32,
}

impl EquationProblem {
    /// Build a problem; division requires a non-zero divisor
    ///
    /// Division is integer division truncating toward zero.
    pub fn new(operand_a: i32, operand_b: i32, operator: Operator) -> Result<Self> {
        if operator == Operator::Divide && operand_b == 0 {
            return Err(Error::InvalidInput("division by zero".into()));
        }
        let correct_answer = answer(operand_a, operand_b, operator).ok_or_else(|| {
            Error::InvalidInput(format!(
                "{} {} {} overflows",
                operand_a,
                operator.symbol(),
                operand_b
            ))
        })?;

        Ok(Self {
            operand_a,
            operand_b,
            operator,
            correct_answer,
        })
    }

    /// Draw both operands from 1..=20 and the operator uniformly
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let operand_a = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
        let operand_b = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
        let operator = Operator::ALL[rng.gen_range(0..Operator::ALL.len())];
        Self {
            operand_a,
            operand_b,
            operator,
            // operands in 1..=20 cannot overflow or divide by zero
            correct_answer: answer(operand_a, operand_b, operator).unwrap_or_default(),
        }
    }

    /// Problem as shown to the player, e.g. "7 * 3"
    pub fn text(&self) -> String {
        format!(
            "{} {} {}",
            self.operand_a,
            self.operator.symbol(),
            self.operand_b
        )
    }
}

/// Exact result of `a op b`; `None` on overflow or a zero divisor
fn answer(a: i32, b: i32, operator: Operator) -> Option<i32> {
    match operator {
        Operator::Add => a.checked_add(b),
        Operator::Subtract => a.checked_sub(b),
        Operator::Multiply => a.checked_mul(b),
        Operator::Divide => a.checked_div(b),
    }
}

/// A scored round
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoredAnswer {
    pub problem: EquationProblem,
    pub answer: i64,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EquationPhase {
    Idle,
    AwaitingAnswer,
    Complete,
    Aborted,
}

pub struct EquationGame<R = StdRng> {
    rng: R,
    policy: AnswerPolicy,
    session_id: Option<Uuid>,
    rounds: u32,
    /// Fixed problems still to be asked; empty for random sessions
    scripted: VecDeque<EquationProblem>,
    current: Option<EquationProblem>,
    records: Vec<ScoredAnswer>,
    phase: EquationPhase,
}

impl EquationGame<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for EquationGame<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> EquationGame<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            policy: AnswerPolicy::default(),
            session_id: None,
            rounds: 0,
            scripted: VecDeque::new(),
            current: None,
            records: Vec::new(),
            phase: EquationPhase::Idle,
        }
    }

    pub fn with_policy(mut self, policy: AnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Begin a session of `count` rounds
    ///
    /// Any session in progress is discarded. Each problem is generated when
    /// its round comes up. Returns the first problem.
    pub fn start(&mut self, count: i64) -> Result<&EquationProblem> {
        let count = validate::check_count(count)?;
        self.begin(count, VecDeque::new())
    }

    /// Begin a session over a fixed list of problems
    pub fn start_with(&mut self, problems: Vec<EquationProblem>) -> Result<&EquationProblem> {
        if problems.is_empty() {
            return Err(Error::InvalidCount("no problems supplied".into()));
        }
        let count = u32::try_from(problems.len())
            .map_err(|_| Error::InvalidCount(format!("{} problems is too many", problems.len())))?;
        self.begin(count, problems.into())
    }

    fn begin(&mut self, rounds: u32, scripted: VecDeque<EquationProblem>) -> Result<&EquationProblem> {
        let id = Uuid::new_v4();
        tracing::info!("Equation session {} started with {} rounds", id, rounds);

        self.session_id = Some(id);
        self.rounds = rounds;
        self.scripted = scripted;
        self.records.clear();
        self.phase = EquationPhase::AwaitingAnswer;
        self.current = Some(self.next_problem());

        self.current_problem()
            .ok_or_else(|| Error::State("session has no problems".into()))
    }

    fn next_problem(&mut self) -> EquationProblem {
        match self.scripted.pop_front() {
            Some(problem) => problem,
            None => EquationProblem::generate(&mut self.rng),
        }
    }

    /// Problem awaiting an answer, if any
    pub fn current_problem(&self) -> Option<&EquationProblem> {
        match self.phase {
            EquationPhase::AwaitingAnswer => self.current.as_ref(),
            _ => None,
        }
    }

    /// Score an answer to the current problem
    ///
    /// An unparseable answer does not advance the round. Under
    /// [`AnswerPolicy::AbortSession`] it also ends the session.
    pub fn submit_answer(&mut self, raw: &str) -> Result<ScoredAnswer> {
        let problem = self
            .current_problem()
            .cloned()
            .ok_or_else(|| Error::State(format!("no problem awaiting an answer ({:?})", self.phase)))?;

        let answer = match validate::answer(raw) {
            Ok(answer) => answer,
            Err(e) => {
                if self.policy == AnswerPolicy::AbortSession {
                    self.phase = EquationPhase::Aborted;
                    tracing::warn!(
                        "Equation session aborted after {} of {} rounds: {}",
                        self.records.len(),
                        self.rounds,
                        e
                    );
                }
                return Err(e);
            }
        };

        let scored = ScoredAnswer {
            correct: answer == i64::from(problem.correct_answer),
            problem,
            answer,
        };
        tracing::debug!(
            "Round {}: {} = {} ({})",
            self.records.len() + 1,
            scored.problem.text(),
            answer,
            if scored.correct { "correct" } else { "wrong" }
        );
        self.records.push(scored.clone());

        if self.records.len() >= self.rounds as usize {
            self.phase = EquationPhase::Complete;
            self.current = None;
            tracing::info!("Equation session complete: {}", self.score());
        } else {
            self.current = Some(self.next_problem());
        }

        Ok(scored)
    }

    pub fn phase(&self) -> EquationPhase {
        self.phase
    }

    pub fn policy(&self) -> AnswerPolicy {
        self.policy
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Rounds scored so far in the current session
    pub fn records(&self) -> &[ScoredAnswer] {
        &self.records
    }

    pub fn correct_count(&self) -> u32 {
        self.records.iter().filter(|r| r.correct).count() as u32
    }

    /// Number of rounds in the current session
    pub fn total(&self) -> u32 {
        self.rounds
    }

    pub fn score(&self) -> GameScore {
        GameScore {
            correct: self.correct_count(),
            answered: self.records.len() as u32,
            total: self.total(),
        }
    }

    /// Final score once the session is complete or aborted
    pub fn summary(&self) -> Option<GameScore> {
        match self.phase {
            EquationPhase::Complete | EquationPhase::Aborted => Some(self.score()),
            _ => None,
        }
    }
}
