//! Body mass index and basal metabolic rate.
//!
//! Pure functions; nothing is retained between calls.

use crate::{validate, Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Sex {
    type Err = Error;

    /// Accepts anything starting with "m" or "f", in any case
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') => Ok(Sex::Male),
            Some('F') => Ok(Sex::Female),
            _ => Err(Error::InvalidInput(format!(
                "sex must be M or F, got {:?}",
                s.trim()
            ))),
        }
    }
}

/// Inputs for one calculation; not retained
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub sex: Sex,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HealthReport {
    pub bmi: f64,
    /// Mifflin-St Jeor, kcal/day
    pub bmr: f64,
}

/// weight / (height in meters)²
///
/// Callers are expected to have validated both inputs as positive.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// 10·w + 6.25·h − 5·age, then +5 for men or −161 for women
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years + offset
}

/// Compute BMI and BMR; every measurement must be positive
pub fn compute(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> Result<HealthReport> {
    check_positive("weight", weight_kg)?;
    check_positive("height", height_cm)?;
    check_positive("age", age_years)?;

    let report = HealthReport {
        bmi: body_mass_index(weight_kg, height_cm),
        bmr: basal_metabolic_rate(weight_kg, height_cm, age_years, sex),
    };
    tracing::debug!("Health report: BMI {:.2}, BMR {:.2}", report.bmi, report.bmr);
    Ok(report)
}

impl HealthProfile {
    pub fn report(&self) -> Result<HealthReport> {
        compute(self.weight_kg, self.height_cm, self.age_years, self.sex)
    }
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<f64> {
    validate::positive(value).map_err(|e| Error::InvalidInput(format!("{}: {}", field, e)))
}
