#![forbid(unsafe_code)]

//! Interactive logic engine for the Kaizen self-improvement tools.
//!
//! This crate provides:
//! - Input validation shared by every tool
//! - Weekly planner grid and calorie ledger
//! - Equation and memory brain games
//! - Health, sleep, water and workout calculators/trackers
//!
//! Each tool is an independent value owned by the caller; presentation is
//! left to the shell.

pub mod types;
pub mod error;
pub mod validate;
pub mod config;
pub mod logging;
pub mod planner;
pub mod calories;
pub mod equations;
pub mod memory;
pub mod health;
pub mod sleep;
pub mod water;
pub mod workout;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use planner::WeeklyPlanner;
pub use calories::{CalorieLedger, EntryOutcome, FoodEntry};
pub use equations::{EquationGame, EquationPhase, EquationProblem, Operator};
pub use memory::{MemoryGame, MemoryPhase};
pub use health::{HealthProfile, HealthReport, Sex};
pub use sleep::{SleepPhase, SleepTracker};
pub use water::{Reminder, WaterPhase, WaterReminder, WaterState};
pub use workout::{FitnessGoal, WorkoutPlan};
