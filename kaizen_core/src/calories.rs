//! Calorie ledger: food lookup, running total and append-only log.

use crate::{validate, Error, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Built-in kcal per gram (or per ml for liquids)
static SEEDED_FOODS: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    [
        ("bread", 2.5),
        ("pasta", 1.31),
        ("chicken", 2.39),
        ("milk", 0.62),
        ("rice", 1.3),
        ("egg", 1.55),
        ("apple", 0.52),
        ("banana", 0.89),
        ("potato", 0.77),
        ("carrot", 0.41),
    ]
    .into_iter()
    .map(|(name, kcal)| (name.to_string(), kcal))
    .collect()
});

/// Get a reference to the built-in food table
pub fn seeded_foods() -> &'static HashMap<String, f64> {
    &SEEDED_FOODS
}

/// One logged food item; never modified after it is appended
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub quantity: f64,
    pub kcal: f64,
    /// Name was not in the table; quantity was taken as kcal
    pub manual: bool,
    pub logged_at: DateTime<Utc>,
}

/// Result of a successful [`CalorieLedger::add_entry`]
#[derive(Clone, Debug, PartialEq)]
pub enum EntryOutcome {
    /// Food found in the table; kcal = quantity × per-unit value
    Known(FoodEntry),
    /// Food not found; quantity recorded verbatim as kcal
    UnknownFood(FoodEntry),
}

impl EntryOutcome {
    pub fn entry(&self) -> &FoodEntry {
        match self {
            EntryOutcome::Known(entry) | EntryOutcome::UnknownFood(entry) => entry,
        }
    }

    pub fn is_unknown_food(&self) -> bool {
        matches!(self, EntryOutcome::UnknownFood(_))
    }
}

/// Snapshot of the ledger totals
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_kcal: f64,
    pub entries: usize,
}

#[derive(Clone, Debug)]
pub struct CalorieLedger {
    foods: HashMap<String, f64>,
    total: f64,
    entries: Vec<FoodEntry>,
}

impl Default for CalorieLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CalorieLedger {
    /// Ledger backed by the built-in food table
    pub fn new() -> Self {
        Self {
            foods: seeded_foods().clone(),
            total: 0.0,
            entries: Vec::new(),
        }
    }

    /// Ledger with additional foods layered over the built-in table
    ///
    /// Names are lowercased; extra entries replace built-in ones of the same name.
    pub fn with_extra_foods<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new();
        for (name, kcal) in extra {
            let name = normalize(name.as_ref());
            if name.is_empty() {
                return Err(Error::Config("food name must not be empty".into()));
            }
            let kcal = validate::non_negative(kcal)
                .map_err(|e| Error::Config(format!("food '{}': {}", name, e)))?;
            ledger.foods.insert(name, kcal);
        }
        Ok(ledger)
    }

    /// Case-insensitive kcal-per-unit lookup; `None` for unknown foods
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.foods.get(&normalize(name)).copied()
    }

    /// Log a food item from raw user text
    ///
    /// An unknown food is still recorded, with the quantity taken as kcal;
    /// the outcome tells the caller so it can warn the user.
    pub fn add_entry(&mut self, name: &str, quantity: &str) -> Result<EntryOutcome> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(Error::InvalidInput("food name is empty".into()));
        }
        let quantity = validate::quantity(quantity)?;

        let per_unit = self.foods.get(&name).copied();
        let entry = FoodEntry {
            kcal: per_unit.map_or(quantity, |k| k * quantity),
            manual: per_unit.is_none(),
            name,
            quantity,
            logged_at: Utc::now(),
        };

        self.total += entry.kcal;
        self.entries.push(entry.clone());

        if entry.manual {
            tracing::warn!(
                "Food '{}' not found, recorded {} kcal manually",
                entry.name,
                entry.kcal
            );
            Ok(EntryOutcome::UnknownFood(entry))
        } else {
            tracing::debug!(
                "Logged {} x {} = {} kcal",
                entry.name,
                entry.quantity,
                entry.kcal
            );
            Ok(EntryOutcome::Known(entry))
        }
    }

    /// Running total of all logged kcal
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Logged entries in insertion order
    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            total_kcal: self.total,
            entries: self.entries.len(),
        }
    }

    /// Total recomputed from the log, in the same order the running total was built
    pub fn recomputed_total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, e| acc + e.kcal)
    }

    /// Known food names, sorted
    pub fn food_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.foods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
