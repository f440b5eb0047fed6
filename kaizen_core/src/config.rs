//! Configuration file support for Kaizen.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/kaizen/config.toml`.
//! It only supplies defaults and tuning; tool state is never written back.

use crate::validate::MAX_COUNT;
use crate::{AnswerPolicy, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub brain: BrainConfig,

    #[serde(default)]
    pub calories: CaloriesConfig,

    #[serde(default)]
    pub sleep: SleepConfig,

    #[serde(default)]
    pub water: WaterConfig,
}

/// Brain trainer settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrainConfig {
    #[serde(default = "default_equation_rounds")]
    pub equation_rounds: u32,

    #[serde(default = "default_memory_count")]
    pub memory_count: u32,

    #[serde(default)]
    pub on_invalid_answer: AnswerPolicy,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            equation_rounds: default_equation_rounds(),
            memory_count: default_memory_count(),
            on_invalid_answer: AnswerPolicy::default(),
        }
    }
}

/// Extra foods layered over the built-in calorie table
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CaloriesConfig {
    /// Food name to kcal per unit
    #[serde(default)]
    pub foods: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SleepConfig {
    #[serde(default = "default_sleep_goal_hours")]
    pub default_goal_hours: f64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            default_goal_hours: default_sleep_goal_hours(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaterConfig {
    #[serde(default = "default_reminder_interval_seconds")]
    pub reminder_interval_seconds: u64,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            reminder_interval_seconds: default_reminder_interval_seconds(),
        }
    }
}

// Default value functions
fn default_equation_rounds() -> u32 {
    5
}

fn default_memory_count() -> u32 {
    5
}

fn default_sleep_goal_hours() -> f64 {
    8.0
}

fn default_reminder_interval_seconds() -> u64 {
    30 * 60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("kaizen").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the tools would refuse at runtime
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("equation_rounds", self.brain.equation_rounds),
            ("memory_count", self.brain.memory_count),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("brain.{} must be positive", field)));
            }
            if value > MAX_COUNT {
                return Err(Error::Config(format!(
                    "brain.{} must be at most {}",
                    field, MAX_COUNT
                )));
            }
        }
        if self.water.reminder_interval_seconds == 0 {
            return Err(Error::Config(
                "water.reminder_interval_seconds must be positive".into(),
            ));
        }
        if !self.sleep.default_goal_hours.is_finite() || self.sleep.default_goal_hours < 0.0 {
            return Err(Error::Config(
                "sleep.default_goal_hours must not be negative".into(),
            ));
        }
        for (name, kcal) in &self.calories.foods {
            if name.trim().is_empty() || !kcal.is_finite() || *kcal < 0.0 {
                return Err(Error::Config(format!("invalid food entry '{}' = {}", name, kcal)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.brain.equation_rounds, 5);
        assert_eq!(config.brain.memory_count, 5);
        assert_eq!(config.brain.on_invalid_answer, AnswerPolicy::AbortSession);
        assert_eq!(config.water.reminder_interval_seconds, 1800);
        assert!(config.calories.foods.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.calories.foods.insert("oats".into(), 3.89);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.brain.equation_rounds, config.brain.equation_rounds);
        assert_eq!(parsed.calories.foods, config.calories.foods);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[brain]
on_invalid_answer = "retry"

[calories.foods]
oats = 3.89
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.brain.on_invalid_answer, AnswerPolicy::RetryRound);
        assert_eq!(config.brain.memory_count, 5); // default
        assert_eq!(config.calories.foods.get("oats"), Some(&3.89));
        assert_eq!(config.sleep.default_goal_hours, 8.0);
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.water.reminder_interval_seconds = 600;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.water.reminder_interval_seconds, 600);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[water]\nreminder_interval_seconds = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[brain]\nequation_rounds = 5000\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[brain\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
