//! BMI-driven workout recommendation.
//!
//! The goal is derived from BMI and each goal maps to a fixed program.

use crate::health::{body_mass_index, check_positive};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Below this BMI the goal is to gain muscle
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// At or above this BMI the goal is to lose weight
pub const OVERWEIGHT_FROM: f64 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    GainMuscle,
    LoseWeight,
    Maintain,
}

impl FitnessGoal {
    pub fn label(self) -> &'static str {
        match self {
            FitnessGoal::GainMuscle => "Gaining Muscle",
            FitnessGoal::LoseWeight => "Losing Weight",
            FitnessGoal::Maintain => "Maintaining Fitness",
        }
    }
}

impl std::fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const GAIN_MUSCLE: &[&str] = &[
    "Chest Press: 3 x 12",
    "Leg Press: 3 x 12",
    "Hack Squats: 3 x 12",
    "Shoulder Press: 3 x 12",
    "Bicep Curl: 3 x 12",
    "Tricep Pushdown: 3 x 12",
    "Lat Pulldown: 3 x 12",
    "Seated Row: 3 x 12",
    "Hamstring Curl: 3 x 12",
    "Calf Raise: 3 x 12",
    "Ab Machine: 3 x 15",
];

const LOSE_WEIGHT: &[&str] = &[
    "Treadmill: 3 x 10 min",
    "Elliptical: 3 x 10 min",
    "Cycling: 3 x 15 min",
    "Rowing Machine: 3 x 10 min",
    "Stair Climber: 3 x 10 min",
    "Jump Rope: 3 x 2 min",
    "HIIT Circuit: 3 x 15 min",
    "Speed Walking: 3 x 15 min",
    "Aerobics: 3 x 20 min",
    "Swimming: 3 x 15 min",
];

const MAINTAIN: &[&str] = &[
    "Push-ups: 3 x 15",
    "Squats: 3 x 15",
    "Planks: 3 x 30 seconds",
    "Lunges: 3 x 12 per leg",
    "Jumping Jacks: 3 x 20",
    "Mountain Climbers: 3 x 20",
    "Burpees: 3 x 10",
    "Dumbbell Rows: 3 x 12",
    "Russian Twists: 3 x 20",
    "Bicycle Crunches: 3 x 20",
];

/// A computed recommendation; immutable once built
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkoutPlan {
    pub bmi: f64,
    pub goal: FitnessGoal,
    pub exercises: Vec<String>,
}

/// BMI from height and weight; both must be positive
pub fn bmi(height_cm: f64, weight_kg: f64) -> Result<f64> {
    check_positive("height", height_cm)?;
    check_positive("weight", weight_kg)?;
    Ok(body_mass_index(weight_kg, height_cm))
}

/// `< 18.5` gain muscle, `>= 25` lose weight, otherwise maintain
pub fn classify(bmi: f64) -> FitnessGoal {
    if bmi < UNDERWEIGHT_BELOW {
        FitnessGoal::GainMuscle
    } else if bmi >= OVERWEIGHT_FROM {
        FitnessGoal::LoseWeight
    } else {
        FitnessGoal::Maintain
    }
}

/// Fixed program for a goal
pub fn plan_for(goal: FitnessGoal) -> &'static [&'static str] {
    match goal {
        FitnessGoal::GainMuscle => GAIN_MUSCLE,
        FitnessGoal::LoseWeight => LOSE_WEIGHT,
        FitnessGoal::Maintain => MAINTAIN,
    }
}

/// Plan built from an already-known BMI
pub fn plan_from_bmi(bmi: f64) -> WorkoutPlan {
    let goal = classify(bmi);
    WorkoutPlan {
        bmi,
        goal,
        exercises: plan_for(goal).iter().map(|s| s.to_string()).collect(),
    }
}

/// Full pipeline: BMI, goal, program
pub fn recommend(height_cm: f64, weight_kg: f64) -> Result<WorkoutPlan> {
    let plan = plan_from_bmi(bmi(height_cm, weight_kg)?);
    tracing::info!("BMI {:.2} -> {}", plan.bmi, plan.goal);
    Ok(plan)
}
