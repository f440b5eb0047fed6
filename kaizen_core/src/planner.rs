//! Weekly planner grid.
//!
//! Nine two-hour time slots from 06:00 to midnight, one read-only time
//! column followed by seven editable day columns (Monday first).

use crate::{Error, Result};
use chrono::Weekday;

/// Number of time-slot rows
pub const SLOTS: usize = 9;

/// Number of editable day columns
pub const DAYS: usize = 7;

/// Time column plus one column per day
pub const COLUMNS: usize = DAYS + 1;

/// Placeholder shown in a cell with no activity
pub const EMPTY_ACTIVITY: &str = "   -";

/// Column headers for rendering, time column first
pub const HEADERS: [&str; COLUMNS] = [
    "Time Slot",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const FIRST_SLOT_HOUR: usize = 6;
const SLOT_HOURS: usize = 2;

/// Editable timetable owned by one planner instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeeklyPlanner {
    grid: [[String; COLUMNS]; SLOTS],
}

impl Default for WeeklyPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyPlanner {
    /// Create a planner already initialized with time labels and empty days
    pub fn new() -> Self {
        let mut planner = Self {
            grid: std::array::from_fn(|_| std::array::from_fn(|_| String::new())),
        };
        planner.initialize();
        planner
    }

    /// Restore every time label and clear every day cell
    pub fn initialize(&mut self) {
        for (i, row) in self.grid.iter_mut().enumerate() {
            row[0] = slot_label(i);
            for cell in row.iter_mut().skip(1) {
                *cell = EMPTY_ACTIVITY.to_string();
            }
        }
        tracing::debug!("Weekly planner reset");
    }

    /// Same as [`initialize`](Self::initialize); matches the "Reset All" action
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Overwrite the activity at `row` (0..=8) on `day` (0..=6, Monday = 0)
    pub fn set_activity(&mut self, row: usize, day: usize, text: impl Into<String>) -> Result<()> {
        check_cell(row, day)?;
        let text = text.into();
        tracing::debug!("Planner cell ({}, {}) set to {:?}", row, day, text);
        self.grid[row][day + 1] = text;
        Ok(())
    }

    /// Overwrite the activity at `row` on the given weekday
    pub fn set_activity_on(
        &mut self,
        row: usize,
        weekday: Weekday,
        text: impl Into<String>,
    ) -> Result<()> {
        self.set_activity(row, weekday.num_days_from_monday() as usize, text)
    }

    /// Read one day cell
    pub fn activity(&self, row: usize, day: usize) -> Result<&str> {
        check_cell(row, day)?;
        Ok(&self.grid[row][day + 1])
    }

    /// Label of a time-slot row, e.g. "06:00 - 08:00"
    pub fn slot(&self, row: usize) -> Result<&str> {
        if row >= SLOTS {
            return Err(out_of_range("row", row, SLOTS - 1));
        }
        Ok(&self.grid[row][0])
    }

    /// Full table for rendering, time column first
    pub fn grid(&self) -> &[[String; COLUMNS]; SLOTS] {
        &self.grid
    }
}

fn slot_label(row: usize) -> String {
    let start = FIRST_SLOT_HOUR + SLOT_HOURS * row;
    let end = (start + SLOT_HOURS) % 24;
    format!("{:02}:00 - {:02}:00", start, end)
}

fn check_cell(row: usize, day: usize) -> Result<()> {
    if row >= SLOTS {
        return Err(out_of_range("row", row, SLOTS - 1));
    }
    if day >= DAYS {
        return Err(out_of_range("day", day, DAYS - 1));
    }
    Ok(())
}

fn out_of_range(what: &'static str, index: usize, max: usize) -> Error {
    Error::OutOfRange { what, index, max }
}
