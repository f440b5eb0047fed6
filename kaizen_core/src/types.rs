//! Types shared across components: game scoring and goal progress.

use serde::{Deserialize, Serialize};

/// What a game does when an answer cannot be parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerPolicy {
    /// End the whole session; rounds already scored are kept
    #[default]
    #[serde(rename = "abort")]
    AbortSession,
    /// Reject the answer and keep waiting on the same round
    #[serde(rename = "retry")]
    RetryRound,
}

/// Score of a game session, final once the session is terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameScore {
    pub correct: u32,
    pub answered: u32,
    pub total: u32,
}

impl std::fmt::Display for GameScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} out of {}", self.correct, self.total)
    }
}

/// Goal-vs-progress accumulator behind the sleep and water trackers
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Progress {
    pub goal: f64,
    pub achieved: f64,
}

impl Progress {
    pub fn new(goal: f64, achieved: f64) -> Self {
        Self { goal, achieved }
    }

    /// Amount still needed, never below zero
    pub fn remaining(&self) -> f64 {
        (self.goal - self.achieved).max(0.0)
    }

    /// Amount achieved beyond the goal, never below zero
    pub fn surplus(&self) -> f64 {
        (self.achieved - self.goal).max(0.0)
    }

    pub fn is_met(&self) -> bool {
        self.achieved >= self.goal
    }

    pub(crate) fn add(&mut self, amount: f64) {
        self.achieved += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        policy: AnswerPolicy,
    }

    #[test]
    fn test_policy_names() {
        let w: Wrapper = toml::from_str(r#"policy = "retry""#).unwrap();
        assert_eq!(w.policy, AnswerPolicy::RetryRound);
        let w: Wrapper = toml::from_str(r#"policy = "abort""#).unwrap();
        assert_eq!(w.policy, AnswerPolicy::AbortSession);
        assert_eq!(AnswerPolicy::default(), AnswerPolicy::AbortSession);
    }

    #[test]
    fn test_score_display() {
        let score = GameScore { correct: 3, answered: 5, total: 5 };
        assert_eq!(score.to_string(), "3 out of 5");
    }

    #[test]
    fn test_progress_remaining_and_surplus() {
        let mut p = Progress::new(8.0, 5.0);
        assert_eq!(p.remaining(), 3.0);
        assert!(!p.is_met());
        p.add(4.0);
        assert!(p.is_met());
        assert_eq!(p.remaining(), 0.0);
        assert_eq!(p.surplus(), 1.0);
    }
}
