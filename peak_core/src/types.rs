//! Core domain types for the bench peaking program.
//!
//! This module defines the values the program generator produces:
//! - The three competition-style bench variations
//! - Per-set prescriptions, grouped into days and weeks
//! - Assistance (accessory) work attached to each week

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Exercise Types
// ============================================================================

/// Main lift variation tracked by the program
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Bench,
    PausedBench,
    LegsUpBench,
}

impl ExerciseKind {
    /// All variations, in input order (bench, paused, legs-up)
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Bench,
        ExerciseKind::PausedBench,
        ExerciseKind::LegsUpBench,
    ];

    /// Human readable name used in listings and exports
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Bench => "Bench Press",
            ExerciseKind::PausedBench => "Paused Bench (2s)",
            ExerciseKind::LegsUpBench => "Legs-Up Bench",
        }
    }

    /// Short label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Bench => "bench",
            ExerciseKind::PausedBench => "paused bench",
            ExerciseKind::LegsUpBench => "legs-up bench",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Main Lift Prescriptions
// ============================================================================

/// One exercise prescription within a training day
///
/// `rpe` and `estimated_max` are either both present or both absent. A
/// prescription without them is a ramp/feeler single.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetPrescription {
    pub exercise: ExerciseKind,
    /// Working weight in kg, one decimal place
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub rpe: Option<f64>,
    /// Estimated one-rep max in kg, one decimal place
    pub estimated_max: Option<f64>,
}

impl SetPrescription {
    /// Whether this is a ramp/feeler set with no progression semantics
    pub fn is_ramp(&self) -> bool {
        self.rpe.is_none()
    }
}

/// A training day (1..=3) and its ordered prescriptions
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub day: u8,
    pub prescriptions: Vec<SetPrescription>,
}

// ============================================================================
// Accessory Types
// ============================================================================

/// Weekday an accessory block is scheduled on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Wednesday,
    Friday,
}

impl Weekday {
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Friday => "Friday",
        }
    }
}

/// Muscle group an accessory targets
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Triceps,
    Back,
    Shoulders,
}

impl MuscleGroup {
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
        }
    }
}

/// Assistance exercise prescription; descriptive only
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessoryPrescription {
    pub weekday: Weekday,
    pub category: MuscleGroup,
    pub name: String,
    pub reps: u32,
    pub sets: u32,
}

// ============================================================================
// Week Type
// ============================================================================

/// A complete program week: three training days plus accessory work
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeekPlan {
    pub week: u8,
    pub days: Vec<DayPlan>,
    pub accessories: Vec<AccessoryPrescription>,
}

impl WeekPlan {
    /// Look up a day by its 1-based index
    pub fn day(&self, day: u8) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Whether this is a reduced-volume deload week (4, 8, 12)
    pub fn is_deload(&self) -> bool {
        crate::formulas::is_deload_week(self.week)
    }
}
