//! Sleep goal tracker.
//!
//! `Idle -> Tracking -> Met`. Each call applies one step; the caller decides
//! when to stop asking for more sleep.

use crate::types::Progress;
use crate::{validate, Error, Result};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SleepPhase {
    Idle,
    Tracking,
    Met,
}

/// Snapshot returned after every operation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SleepStatus {
    pub phase: SleepPhase,
    pub goal_hours: f64,
    pub slept_hours: f64,
    pub remaining_hours: f64,
}

#[derive(Clone, Debug)]
pub struct SleepTracker {
    progress: Option<Progress>,
}

impl Default for SleepTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SleepTracker {
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Begin tracking; already met when `slept_hours >= goal_hours`
    pub fn start(&mut self, goal_hours: f64, slept_hours: f64) -> Result<SleepStatus> {
        let goal_hours = check_hours("goal", goal_hours)?;
        let slept_hours = check_hours("slept", slept_hours)?;

        let progress = Progress::new(goal_hours, slept_hours);
        self.progress = Some(progress);

        tracing::info!(
            "Sleep tracking started: {} of {} hours",
            slept_hours,
            goal_hours
        );
        Ok(self.status())
    }

    /// Add more sleep; rejected with [`Error::GoalMet`] once the goal is reached
    pub fn add_sleep(&mut self, hours: f64) -> Result<SleepStatus> {
        let progress = self
            .progress
            .as_mut()
            .ok_or_else(|| Error::State("sleep tracking not started".into()))?;
        if progress.is_met() {
            return Err(Error::GoalMet);
        }
        let hours = validate::check_amount(hours)?;

        progress.add(hours);
        if progress.is_met() {
            tracing::info!("Sleep goal met with {} hours", progress.achieved);
        } else {
            tracing::debug!("Sleep: {} hours remaining", progress.remaining());
        }
        Ok(self.status())
    }

    pub fn phase(&self) -> SleepPhase {
        match &self.progress {
            None => SleepPhase::Idle,
            Some(p) if p.is_met() => SleepPhase::Met,
            Some(_) => SleepPhase::Tracking,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.progress.map_or(0.0, |p| p.remaining())
    }

    /// Hours slept beyond the goal
    pub fn surplus(&self) -> f64 {
        self.progress.map_or(0.0, |p| p.surplus())
    }

    pub fn status(&self) -> SleepStatus {
        let progress = self.progress.unwrap_or(Progress::new(0.0, 0.0));
        SleepStatus {
            phase: self.phase(),
            goal_hours: progress.goal,
            slept_hours: progress.achieved,
            remaining_hours: progress.remaining(),
        }
    }
}

fn check_hours(field: &str, value: f64) -> Result<f64> {
    validate::non_negative(value).map_err(|e| Error::InvalidInput(format!("{}: {}", field, e)))
}
