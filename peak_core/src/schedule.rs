//! The fixed 12-week bench peaking schedule.
//!
//! Each slot says which lift to perform, what its working weight is derived
//! from (a raw input max, or an estimated max recorded by an earlier slot),
//! the percentage applied, the rep/set target and the effort prescription.
//! The numbers encode the coaching program and are not derived from anything.

use crate::types::ExerciseKind::{self, Bench, LegsUpBench, PausedBench};
use std::collections::HashSet;

/// Number of weeks in the program
pub const PROGRAM_WEEKS: u8 = 12;

/// Training days per week
pub const DAYS_PER_WEEK: u8 = 3;

/// Identifies the slot that recorded an estimated max
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotRef {
    pub week: u8,
    pub day: u8,
    /// 0-based position within the day
    pub slot: u8,
}

/// What a slot's working weight is a percentage of
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Base {
    /// One of the three maxes supplied by the lifter
    Input(ExerciseKind),
    /// The full-precision estimate recorded by an earlier slot
    Estimate(SlotRef),
}

/// How an all-out single defines its estimated max
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllOutEstimate {
    /// The unrounded target the weight was rounded from
    Projected,
    /// The rounded weight actually on the bar
    Lifted,
}

/// Effort prescription for a slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effort {
    /// Ramp/feeler single: no RPE, no estimated max
    Ramp,
    /// Submaximal work at the given RPE
    Rpe(f64),
    /// RPE 10 single
    AllOut(AllOutEstimate),
}

impl Effort {
    /// RPE written into the prescription, if any
    pub fn rpe(&self) -> Option<f64> {
        match self {
            Effort::Ramp => None,
            Effort::Rpe(rpe) => Some(*rpe),
            Effort::AllOut(_) => Some(10.0),
        }
    }

    /// Whether this slot records an estimated max
    pub fn records_estimate(&self) -> bool {
        !matches!(self, Effort::Ramp)
    }
}

/// A single prescription slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotSpec {
    pub exercise: ExerciseKind,
    pub base: Base,
    pub percent: f64,
    pub reps: u32,
    pub sets: u32,
    pub effort: Effort,
}

/// Slots for one week, indexed by day - 1
#[derive(Clone, Copy, Debug)]
pub struct WeekSchedule {
    pub week: u8,
    pub days: [&'static [SlotSpec]; DAYS_PER_WEEK as usize],
}

const fn input(exercise: ExerciseKind) -> Base {
    Base::Input(exercise)
}

const fn est(week: u8, day: u8, slot: u8) -> Base {
    Base::Estimate(SlotRef { week, day, slot })
}

const fn work(
    exercise: ExerciseKind,
    base: Base,
    percent: f64,
    reps: u32,
    sets: u32,
    rpe: f64,
) -> SlotSpec {
    SlotSpec {
        exercise,
        base,
        percent,
        reps,
        sets,
        effort: Effort::Rpe(rpe),
    }
}

const fn ramp(exercise: ExerciseKind, base: Base, percent: f64) -> SlotSpec {
    SlotSpec {
        exercise,
        base,
        percent,
        reps: 1,
        sets: 3,
        effort: Effort::Ramp,
    }
}

const fn single(
    exercise: ExerciseKind,
    base: Base,
    percent: f64,
    estimate: AllOutEstimate,
) -> SlotSpec {
    SlotSpec {
        exercise,
        base,
        percent,
        reps: 1,
        sets: 1,
        effort: Effort::AllOut(estimate),
    }
}

use AllOutEstimate::{Lifted, Projected};

/// The program, weeks 1 through 12 in order
pub static PROGRAM: [WeekSchedule; PROGRAM_WEEKS as usize] = [
    WeekSchedule {
        week: 1,
        days: [
            &[
                work(Bench, input(Bench), 0.83, 5, 3, 8.0),
                work(PausedBench, input(PausedBench), 0.8, 5, 3, 7.0),
            ],
            &[
                ramp(Bench, est(1, 1, 0), 0.83),
                work(LegsUpBench, input(LegsUpBench), 0.775, 8, 3, 8.0),
            ],
            &[
                work(Bench, est(1, 1, 0), 0.9, 3, 3, 9.0),
                work(Bench, est(1, 3, 0), 0.8, 6, 3, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 2,
        days: [
            &[
                work(PausedBench, est(1, 1, 1), 0.84, 5, 4, 8.0),
                work(LegsUpBench, est(1, 2, 1), 0.81, 5, 4, 7.0),
            ],
            &[
                ramp(Bench, est(1, 3, 0), 0.825),
                work(Bench, est(1, 3, 1), 0.775, 8, 3, 8.0),
            ],
            &[
                work(LegsUpBench, est(2, 1, 1), 0.915, 2, 3, 9.0),
                work(Bench, est(2, 2, 1), 0.81, 6, 3, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 3,
        days: [
            &[
                work(LegsUpBench, est(2, 3, 0), 0.845, 5, 4, 8.5),
                work(Bench, est(2, 3, 1), 0.81, 5, 5, 7.0),
            ],
            &[
                ramp(Bench, est(3, 1, 1), 0.825),
                work(PausedBench, est(2, 1, 0), 0.795, 8, 3, 9.0),
            ],
            &[
                work(Bench, est(3, 1, 1), 0.95, 1, 3, 9.0),
                work(PausedBench, est(3, 2, 1), 0.81, 6, 4, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 4,
        days: [
            &[
                work(Bench, est(3, 3, 0), 0.96, 1, 1, 9.5),
                work(PausedBench, est(3, 3, 1), 0.81, 5, 5, 7.0),
            ],
            &[
                ramp(Bench, est(4, 1, 0), 0.825),
                work(LegsUpBench, est(3, 1, 0), 0.81, 5, 5, 7.0),
            ],
            &[single(Bench, est(4, 1, 0), 1.0, Projected)],
        ],
    },
    WeekSchedule {
        week: 5,
        days: [
            &[
                work(Bench, est(4, 3, 0), 0.82, 4, 2, 7.0),
                work(PausedBench, est(4, 1, 1), 0.81, 4, 2, 6.0),
            ],
            &[
                ramp(Bench, est(5, 1, 0), 0.825),
                work(LegsUpBench, est(4, 2, 1), 0.795, 6, 3, 7.0),
            ],
            &[
                work(Bench, est(5, 1, 0), 0.93, 2, 3, 9.0),
                work(Bench, est(5, 3, 0), 0.8, 6, 3, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 6,
        days: [
            &[
                work(PausedBench, est(5, 1, 1), 0.86, 4, 4, 8.0),
                work(LegsUpBench, est(5, 2, 1), 0.825, 4, 4, 7.0),
            ],
            &[
                ramp(Bench, est(5, 3, 1), 0.825),
                work(Bench, est(5, 3, 1), 0.81, 6, 4, 8.0),
            ],
            &[
                work(LegsUpBench, est(6, 1, 1), 0.925, 2, 3, 9.0),
                work(Bench, est(6, 2, 1), 0.83, 5, 4, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 7,
        days: [
            &[
                work(LegsUpBench, est(6, 3, 0), 0.86, 4, 5, 8.5),
                work(Bench, est(6, 3, 1), 0.825, 4, 6, 7.0),
            ],
            &[
                ramp(Bench, est(6, 3, 1), 0.825),
                work(PausedBench, est(6, 1, 0), 0.825, 6, 5, 9.0),
            ],
            &[
                work(PausedBench, est(7, 2, 1), 0.95, 1, 3, 9.0),
                work(PausedBench, est(7, 2, 1), 0.85, 4, 5, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 8,
        days: [
            &[
                single(PausedBench, est(7, 3, 1), 1.0, Projected),
                work(Bench, est(7, 1, 1), 0.825, 4, 5, 7.0),
            ],
            &[
                ramp(Bench, est(8, 1, 1), 0.825),
                work(LegsUpBench, est(7, 1, 0), 0.81, 5, 5, 7.0),
            ],
            &[single(Bench, est(8, 1, 1), 1.01, Lifted)],
        ],
    },
    WeekSchedule {
        week: 9,
        days: [
            &[
                work(Bench, est(8, 3, 0), 0.825, 4, 4, 7.0),
                work(PausedBench, est(7, 3, 1), 0.83, 4, 4, 7.0),
            ],
            &[
                ramp(Bench, est(9, 1, 0), 0.825),
                work(Bench, est(9, 1, 0), 0.755, 8, 4, 7.0),
            ],
            &[
                work(LegsUpBench, est(8, 2, 1), 0.91, 1, 3, 7.0),
                work(Bench, est(9, 2, 1), 0.81, 6, 4, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 10,
        days: [
            &[
                work(PausedBench, est(9, 1, 1), 0.86, 4, 5, 8.0),
                work(LegsUpBench, est(9, 3, 0), 0.825, 4, 6, 7.0),
            ],
            &[
                ramp(Bench, est(9, 2, 1), 0.825),
                work(Bench, est(9, 3, 1), 0.8, 6, 5, 8.0),
            ],
            &[
                work(Bench, est(10, 2, 1), 0.93, 2, 3, 9.0),
                work(Bench, est(10, 2, 1), 0.835, 5, 4, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 11,
        days: [
            &[
                work(LegsUpBench, est(10, 1, 1), 0.86, 4, 6, 8.5),
                work(Bench, est(10, 3, 1), 0.83, 4, 6, 7.0),
            ],
            &[
                ramp(Bench, est(10, 2, 1), 0.825),
                work(PausedBench, est(10, 1, 0), 0.845, 5, 5, 9.0),
            ],
            &[
                work(Bench, est(11, 1, 1), 0.95, 1, 3, 9.0),
                work(PausedBench, est(11, 2, 1), 0.85, 4, 5, 8.0),
            ],
        ],
    },
    WeekSchedule {
        week: 12,
        days: [
            &[
                single(PausedBench, est(11, 3, 1), 1.0, Projected),
                work(Bench, est(11, 3, 0), 0.825, 4, 5, 7.0),
            ],
            &[
                ramp(Bench, est(12, 1, 1), 0.825),
                work(LegsUpBench, est(11, 1, 0), 0.815, 5, 5, 7.0),
            ],
            &[single(Bench, est(12, 1, 1), 1.01, Lifted)],
        ],
    },
];

/// Validate the static schedule
///
/// Returns a list of problems; empty means the schedule is well formed and
/// every estimate it reads has been recorded by a strictly earlier slot.
pub fn validate(program: &[WeekSchedule]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut recorded: HashSet<SlotRef> = HashSet::new();

    if program.len() != PROGRAM_WEEKS as usize {
        errors.push(format!(
            "Expected {} weeks, found {}",
            PROGRAM_WEEKS,
            program.len()
        ));
    }

    for (idx, week) in program.iter().enumerate() {
        let expected_week = idx as u8 + 1;
        if week.week != expected_week {
            errors.push(format!(
                "Week at position {} is numbered {}",
                expected_week, week.week
            ));
        }

        for (day_idx, slots) in week.days.iter().enumerate() {
            let day = day_idx as u8 + 1;

            if slots.is_empty() || slots.len() > 2 {
                errors.push(format!(
                    "Week {} day {}: expected 1-2 slots, found {}",
                    week.week,
                    day,
                    slots.len()
                ));
            }

            for (slot_idx, spec) in slots.iter().enumerate() {
                let here = SlotRef {
                    week: week.week,
                    day,
                    slot: slot_idx as u8,
                };

                if spec.reps == 0 || spec.sets == 0 {
                    errors.push(format!("{:?}: reps and sets must be positive", here));
                }
                if spec.percent.is_nan() || spec.percent <= 0.0 {
                    errors.push(format!("{:?}: percent must be positive", here));
                }
                if let Some(rpe) = spec.effort.rpe() {
                    if !(0.0..=10.0).contains(&rpe) {
                        errors.push(format!("{:?}: RPE {} outside 0-10", here, rpe));
                    }
                }

                if let Base::Estimate(source) = spec.base {
                    if source >= here {
                        errors.push(format!(
                            "{:?}: reads {:?}, which is not earlier",
                            here, source
                        ));
                    } else if !recorded.contains(&source) {
                        errors.push(format!(
                            "{:?}: reads {:?}, which records no estimate",
                            here, source
                        ));
                    }
                }

                if spec.effort.records_estimate() {
                    recorded.insert(here);
                }
            }
        }
    }

    errors
}
