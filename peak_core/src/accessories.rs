//! Accessory (assistance) work for each program week.
//!
//! Depends on the week number only. Regular weeks ramp volume across the
//! three weeks of a block; deload weeks swap in a short, light list.

use crate::formulas::{is_deload_week, BLOCK_LENGTH};
use crate::types::MuscleGroup::{self, Back, Chest, Shoulders, Triceps};
use crate::types::Weekday::{self, Friday, Monday, Wednesday};
use crate::AccessoryPrescription;

/// One entry of the regular-week accessory table
struct AccessorySlot {
    weekday: Weekday,
    category: MuscleGroup,
    name: &'static str,
    /// Added to the week's base reps; isolation work runs higher
    rep_offset: u32,
}

const fn slot(
    weekday: Weekday,
    category: MuscleGroup,
    name: &'static str,
    rep_offset: u32,
) -> AccessorySlot {
    AccessorySlot {
        weekday,
        category,
        name,
        rep_offset,
    }
}

const REGULAR: [AccessorySlot; 10] = [
    slot(Monday, Chest, "Dumbbell Press", 0),
    slot(Monday, Triceps, "Cable Pushdown", 5),
    slot(Wednesday, Back, "Lat Pulldown", 0),
    slot(Wednesday, Back, "One-Arm Dumbbell Row", 3),
    slot(Wednesday, Shoulders, "Barbell Front Raise", 5),
    slot(Wednesday, Shoulders, "Barbell Face Pull", 5),
    slot(Friday, Triceps, "Dumbbell Rolling Extension", 0),
    slot(Friday, Triceps, "Cable Pushdown", 5),
    slot(Friday, Chest, "Dumbbell Fly", 0),
    slot(Friday, Chest, "Cable Fly", 5),
];

const DELOAD: [(Weekday, MuscleGroup, &str); 6] = [
    (Monday, Chest, "Dumbbell Fly"),
    (Monday, Triceps, "Rope Pushdown"),
    (Wednesday, Back, "Lat Pulldown"),
    (Wednesday, Shoulders, "Dumbbell Lateral Raise"),
    (Friday, Triceps, "Cable Pushdown"),
    (Friday, Chest, "Cable Fly"),
];

const DELOAD_REPS: u32 = 20;
const DELOAD_SETS: u32 = 2;

/// Base (reps, sets) for a position 1..=3 within a block
///
/// Anything else falls back to the first week's volume.
pub fn cycle_volume(cycle_week: u8) -> (u32, u32) {
    match cycle_week {
        1 => (15, 2),
        2 => (12, 3),
        3 => (10, 4),
        _ => (15, 2),
    }
}

/// The fixed deload-week accessory list
pub fn deload_accessories() -> Vec<AccessoryPrescription> {
    DELOAD
        .iter()
        .map(|(weekday, category, name)| AccessoryPrescription {
            weekday: *weekday,
            category: *category,
            name: (*name).to_string(),
            reps: DELOAD_REPS,
            sets: DELOAD_SETS,
        })
        .collect()
}

/// Accessory prescriptions for a program week
pub fn accessories_for_week(week: u8) -> Vec<AccessoryPrescription> {
    if is_deload_week(week) {
        return deload_accessories();
    }

    let cycle_week = (week - 1) % BLOCK_LENGTH + 1;
    let (reps, sets) = cycle_volume(cycle_week);

    REGULAR
        .iter()
        .map(|s| AccessoryPrescription {
            weekday: s.weekday,
            category: s.category,
            name: s.name.to_string(),
            reps: reps + s.rep_offset,
            sets,
        })
        .collect()
}
