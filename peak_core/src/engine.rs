//! Progression engine: three maxes in, twelve weeks out.
//!
//! The engine walks the static schedule week by week. Every slot with an
//! effort prescription records its estimated max in a table owned by the
//! call; later slots read those entries as the base for their working
//! weight. Entries are written once and never revisited.

use crate::accessories::accessories_for_week;
use crate::formulas::{estimated_1rm, round1};
use crate::schedule::{AllOutEstimate, Base, Effort, SlotRef, SlotSpec, WeekSchedule, PROGRAM};
use crate::{DayPlan, ExerciseKind, SetPrescription, TrainingMaxes, WeekPlan};
use std::collections::BTreeMap;

/// Write-once table of full-precision estimated maxes for one generation call
#[derive(Debug, Default)]
struct EstimatedMaxTable {
    entries: BTreeMap<SlotRef, f64>,
}

impl EstimatedMaxTable {
    fn record(&mut self, key: SlotRef, value: f64) {
        let previous = self.entries.insert(key, value);
        debug_assert!(previous.is_none(), "estimate {:?} recorded twice", key);
    }

    fn get(&self, key: &SlotRef) -> Option<f64> {
        self.entries.get(key).copied()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Holds the inputs and the estimate table while the weeks are produced
struct ProgramEngine {
    bench_max: f64,
    paused_bench_max: f64,
    legs_up_max: f64,
    table: EstimatedMaxTable,
}

impl ProgramEngine {
    fn new(bench_max: f64, paused_bench_max: f64, legs_up_max: f64) -> Self {
        Self {
            bench_max,
            paused_bench_max,
            legs_up_max,
            table: EstimatedMaxTable::default(),
        }
    }

    fn input(&self, exercise: ExerciseKind) -> f64 {
        match exercise {
            ExerciseKind::Bench => self.bench_max,
            ExerciseKind::PausedBench => self.paused_bench_max,
            ExerciseKind::LegsUpBench => self.legs_up_max,
        }
    }

    fn resolve(&self, base: Base) -> f64 {
        match base {
            Base::Input(exercise) => self.input(exercise),
            Base::Estimate(source) => self
                .table
                .get(&source)
                .expect("schedule only reads estimates recorded by earlier slots"),
        }
    }

    fn week(&mut self, schedule: &WeekSchedule) -> WeekPlan {
        let days = schedule
            .days
            .iter()
            .enumerate()
            .map(|(day_idx, slots)| {
                let day = day_idx as u8 + 1;
                let prescriptions = slots
                    .iter()
                    .enumerate()
                    .map(|(slot_idx, spec)| {
                        let here = SlotRef {
                            week: schedule.week,
                            day,
                            slot: slot_idx as u8,
                        };
                        self.prescribe(here, spec)
                    })
                    .collect();
                DayPlan { day, prescriptions }
            })
            .collect();

        let plan = WeekPlan {
            week: schedule.week,
            days,
            accessories: accessories_for_week(schedule.week),
        };

        tracing::debug!(
            "Generated week {} ({} estimates recorded so far)",
            plan.week,
            self.table.len()
        );

        plan
    }

    fn prescribe(&mut self, here: SlotRef, spec: &SlotSpec) -> SetPrescription {
        let target = self.resolve(spec.base) * spec.percent;
        let weight = round1(target);

        let estimate = match spec.effort {
            Effort::Ramp => None,
            Effort::Rpe(rpe) => Some(estimated_1rm(weight, spec.reps, rpe)),
            // At RPE 10 the single is the max; no formula offset
            Effort::AllOut(AllOutEstimate::Projected) => Some(target),
            Effort::AllOut(AllOutEstimate::Lifted) => Some(weight),
        };

        if let Some(value) = estimate {
            self.table.record(here, value);
        }

        SetPrescription {
            exercise: spec.exercise,
            weight,
            reps: spec.reps,
            sets: spec.sets,
            rpe: spec.effort.rpe(),
            estimated_max: estimate.map(round1),
        }
    }
}

/// Generate the full 12-week plan from the three one-rep maxes (kg)
///
/// Pure and deterministic. Inputs are expected to be finite and positive;
/// use [`TrainingMaxes::new`] to check user-supplied values first.
pub fn generate_program(bench_max: f64, paused_bench_max: f64, legs_up_max: f64) -> Vec<WeekPlan> {
    let mut engine = ProgramEngine::new(bench_max, paused_bench_max, legs_up_max);
    let weeks: Vec<WeekPlan> = PROGRAM.iter().map(|week| engine.week(week)).collect();

    tracing::info!(
        "Generated {}-week program from maxes {}/{}/{} ({} estimates)",
        weeks.len(),
        bench_max,
        paused_bench_max,
        legs_up_max,
        engine.table.len()
    );

    weeks
}

impl TrainingMaxes {
    /// Generate the plan for these maxes
    pub fn generate(&self) -> Vec<WeekPlan> {
        generate_program(self.bench, self.paused_bench, self.legs_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessories::deload_accessories;
    use crate::formulas::is_deload_week;
    use crate::ExerciseKind::{Bench, LegsUpBench, PausedBench};

    fn reference_program() -> Vec<WeekPlan> {
        crate::logging::init_test();
        generate_program(90.0, 80.0, 80.0)
    }

    /// (weight, rpe, estimated max) of one slot
    type Row = (f64, Option<f64>, Option<f64>);

    fn flatten(program: &[WeekPlan]) -> Vec<(u8, u8, Row)> {
        program
            .iter()
            .flat_map(|w| {
                w.days.iter().flat_map(move |d| {
                    d.prescriptions
                        .iter()
                        .map(move |p| (w.week, d.day, (p.weight, p.rpe, p.estimated_max)))
                })
            })
            .collect()
    }

    #[test]
    fn test_week_one_day_one() {
        let program = reference_program();
        let day1 = program[0].day(1).unwrap();
        assert_eq!(day1.prescriptions.len(), 2);

        let bench = &day1.prescriptions[0];
        assert_eq!(bench.exercise, ExerciseKind::Bench);
        assert_eq!(bench.weight, 74.7);
        assert_eq!(bench.reps, 5);
        assert_eq!(bench.sets, 3);
        assert_eq!(bench.rpe, Some(8.0));
        assert_eq!(bench.estimated_max, Some(90.5));

        let paused = &day1.prescriptions[1];
        assert_eq!(paused.exercise, ExerciseKind::PausedBench);
        assert_eq!(paused.weight, 64.0);
        assert_eq!(paused.reps, 5);
        assert_eq!(paused.sets, 3);
        assert_eq!(paused.rpe, Some(7.0));
        assert_eq!(paused.estimated_max, Some(79.5));
    }

    /// (week, day, exercise, weight, reps, sets, rpe, estimated max)
    type Slot = (u8, u8, ExerciseKind, f64, u32, u32, Option<f64>, Option<f64>);

    /// Every prescription of the program for maxes 90/80/80
    const REFERENCE_90_80_80: [Slot; 69] = [
        (1, 1, Bench, 74.7, 5, 3, Some(8.0), Some(90.5)),
        (1, 1, PausedBench, 64.0, 5, 3, Some(7.0), Some(79.5)),
        (1, 2, Bench, 75.2, 1, 3, None, None),
        (1, 2, LegsUpBench, 62.0, 8, 3, Some(8.0), Some(80.8)),
        (1, 3, Bench, 81.5, 3, 3, Some(9.0), Some(91.4)),
        (1, 3, Bench, 73.1, 6, 3, Some(8.0), Some(90.8)),
        (2, 1, PausedBench, 66.8, 5, 4, Some(8.0), Some(81.0)),
        (2, 1, LegsUpBench, 65.4, 5, 4, Some(7.0), Some(81.3)),
        (2, 2, Bench, 75.4, 1, 3, None, None),
        (2, 2, Bench, 70.4, 8, 3, Some(8.0), Some(91.7)),
        (2, 3, LegsUpBench, 74.3, 2, 3, Some(9.0), Some(81.1)),
        (2, 3, Bench, 74.3, 6, 3, Some(8.0), Some(92.3)),
        (3, 1, LegsUpBench, 68.5, 5, 4, Some(8.5), Some(82.0)),
        (3, 1, Bench, 74.8, 5, 5, Some(7.0), Some(92.9)),
        (3, 2, Bench, 76.7, 1, 3, None, None),
        (3, 2, PausedBench, 64.4, 8, 3, Some(9.0), Some(82.0)),
        (3, 3, Bench, 88.3, 1, 3, Some(9.0), Some(93.7)),
        (3, 3, PausedBench, 66.4, 6, 4, Some(8.0), Some(82.5)),
        (4, 1, Bench, 89.9, 1, 1, Some(9.5), Some(94.0)),
        (4, 1, PausedBench, 66.8, 5, 5, Some(7.0), Some(83.0)),
        (4, 2, Bench, 77.5, 1, 3, None, None),
        (4, 2, LegsUpBench, 66.4, 5, 5, Some(7.0), Some(82.5)),
        (4, 3, Bench, 94.0, 1, 1, Some(10.0), Some(94.0)),
        (5, 1, Bench, 77.1, 4, 2, Some(7.0), Some(93.5)),
        (5, 1, PausedBench, 67.2, 4, 2, Some(6.0), Some(83.5)),
        (5, 2, Bench, 77.1, 1, 3, None, None),
        (5, 2, LegsUpBench, 65.6, 6, 3, Some(7.0), Some(83.5)),
        (5, 3, Bench, 86.9, 2, 3, Some(9.0), Some(94.8)),
        (5, 3, Bench, 75.8, 6, 3, Some(8.0), Some(94.2)),
        (6, 1, PausedBench, 71.8, 4, 4, Some(8.0), Some(84.9)),
        (6, 1, LegsUpBench, 68.9, 4, 4, Some(7.0), Some(83.5)),
        (6, 2, Bench, 77.7, 1, 3, None, None),
        (6, 2, Bench, 76.3, 6, 4, Some(8.0), Some(94.8)),
        (6, 3, LegsUpBench, 77.3, 2, 3, Some(9.0), Some(84.3)),
        (6, 3, Bench, 78.7, 5, 4, Some(8.0), Some(95.4)),
        (7, 1, LegsUpBench, 72.5, 4, 5, Some(8.5), Some(84.6)),
        (7, 1, Bench, 78.7, 4, 6, Some(7.0), Some(95.4)),
        (7, 2, Bench, 78.7, 1, 3, None, None),
        (7, 2, PausedBench, 70.0, 6, 5, Some(9.0), Some(84.8)),
        (7, 3, PausedBench, 80.6, 1, 3, Some(9.0), Some(85.5)),
        (7, 3, PausedBench, 72.1, 4, 5, Some(8.0), Some(85.2)),
        (8, 1, PausedBench, 85.2, 1, 1, Some(10.0), Some(85.2)),
        (8, 1, Bench, 78.7, 4, 5, Some(7.0), Some(95.4)),
        (8, 2, Bench, 78.7, 1, 3, None, None),
        (8, 2, LegsUpBench, 68.5, 5, 5, Some(7.0), Some(85.1)),
        (8, 3, Bench, 96.3, 1, 1, Some(10.0), Some(96.3)),
        (9, 1, Bench, 79.4, 4, 4, Some(7.0), Some(96.2)),
        (9, 1, PausedBench, 70.7, 4, 4, Some(7.0), Some(85.7)),
        (9, 2, Bench, 79.4, 1, 3, None, None),
        (9, 2, Bench, 72.7, 8, 4, Some(7.0), Some(96.9)),
        (9, 3, LegsUpBench, 77.4, 1, 3, Some(7.0), Some(86.8)),
        (9, 3, Bench, 78.5, 6, 4, Some(8.0), Some(97.5)),
        (10, 1, PausedBench, 73.7, 4, 5, Some(8.0), Some(87.1)),
        (10, 1, LegsUpBench, 71.6, 4, 6, Some(7.0), Some(86.8)),
        (10, 2, Bench, 80.0, 1, 3, None, None),
        (10, 2, Bench, 78.0, 6, 5, Some(8.0), Some(96.9)),
        (10, 3, Bench, 90.1, 2, 3, Some(9.0), Some(98.3)),
        (10, 3, Bench, 80.9, 5, 4, Some(8.0), Some(98.1)),
        (11, 1, LegsUpBench, 74.6, 4, 6, Some(8.5), Some(87.0)),
        (11, 1, Bench, 81.4, 4, 6, Some(7.0), Some(98.7)),
        (11, 2, Bench, 79.9, 1, 3, None, None),
        (11, 2, PausedBench, 73.6, 5, 5, Some(9.0), Some(87.0)),
        (11, 3, Bench, 93.7, 1, 3, Some(9.0), Some(99.4)),
        (11, 3, PausedBench, 73.9, 4, 5, Some(8.0), Some(87.3)),
        (12, 1, PausedBench, 87.3, 1, 1, Some(10.0), Some(87.3)),
        (12, 1, Bench, 82.0, 4, 5, Some(7.0), Some(99.4)),
        (12, 2, Bench, 82.0, 1, 3, None, None),
        (12, 2, LegsUpBench, 70.9, 5, 5, Some(7.0), Some(88.1)),
        (12, 3, Bench, 100.4, 1, 1, Some(10.0), Some(100.4)),
    ];

    #[test]
    fn test_reference_program_every_slot() {
        let program = reference_program();
        let actual: Vec<Slot> = program
            .iter()
            .flat_map(|w| {
                w.days.iter().flat_map(move |d| {
                    d.prescriptions.iter().map(move |p| {
                        (
                            w.week,
                            d.day,
                            p.exercise,
                            p.weight,
                            p.reps,
                            p.sets,
                            p.rpe,
                            p.estimated_max,
                        )
                    })
                })
            })
            .collect();

        assert_eq!(actual.len(), REFERENCE_90_80_80.len());
        for (got, want) in actual.iter().zip(REFERENCE_90_80_80.iter()) {
            assert_eq!(got, want, "week {} day {}", want.0, want.1);
        }
    }

    #[test]
    fn test_heavier_inputs_deload_singles() {
        let program = generate_program(120.0, 105.0, 110.0);

        let w4d3 = &program[3].day(3).unwrap().prescriptions[0];
        assert_eq!((w4d3.weight, w4d3.estimated_max), (125.2, Some(125.2)));

        let w8d1 = &program[7].day(1).unwrap().prescriptions[0];
        assert_eq!((w8d1.weight, w8d1.estimated_max), (111.9, Some(111.9)));

        let w12d3 = &program[11].day(3).unwrap().prescriptions[0];
        assert_eq!((w12d3.weight, w12d3.estimated_max), (134.1, Some(134.1)));
    }

    #[test]
    fn test_determinism() {
        let a = generate_program(102.5, 95.0, 97.5);
        let b = generate_program(102.5, 95.0, 97.5);
        assert_eq!(a, b);

        let bits = |p: &[WeekPlan]| -> Vec<u64> {
            flatten(p).iter().map(|(_, _, r)| r.0.to_bits()).collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_shape() {
        for program in [reference_program(), generate_program(140.0, 130.0, 135.5)] {
            assert_eq!(program.len(), 12);
            for (idx, week) in program.iter().enumerate() {
                assert_eq!(week.week as usize, idx + 1);
                assert_eq!(week.days.len(), 3);
                for (day_idx, day) in week.days.iter().enumerate() {
                    assert_eq!(day.day as usize, day_idx + 1);
                    assert!((1..=2).contains(&day.prescriptions.len()));
                }
                let expected = if is_deload_week(week.week) { 6 } else { 10 };
                assert_eq!(week.accessories.len(), expected);
            }
        }
    }

    #[test]
    fn test_rounding_invariant() {
        for program in [reference_program(), generate_program(117.5, 101.0, 108.5)] {
            for week in &program {
                for p in week.days.iter().flat_map(|d| d.prescriptions.iter()) {
                    assert_eq!(round1(p.weight), p.weight);
                    if let Some(e) = p.estimated_max {
                        assert_eq!(round1(e), e);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rpe_and_estimate_pairing() {
        let program = reference_program();
        for week in &program {
            for p in week.days.iter().flat_map(|d| d.prescriptions.iter()) {
                assert_eq!(p.rpe.is_some(), p.estimated_max.is_some());
                assert_eq!(p.is_ramp(), p.estimated_max.is_none());
            }
        }
    }

    #[test]
    fn test_week_four_final_single() {
        let program = reference_program();
        let day3 = program[3].day(3).unwrap();
        assert_eq!(day3.prescriptions.len(), 1);

        let single = &day3.prescriptions[0];
        assert_eq!(single.reps, 1);
        assert_eq!(single.sets, 1);
        assert_eq!(single.rpe, Some(10.0));
        assert_eq!(single.estimated_max, Some(single.weight));
    }

    #[test]
    fn test_all_out_singles_carry_weight_as_estimate() {
        let program = generate_program(97.5, 85.0, 90.0);
        for week in &program {
            for p in week.days.iter().flat_map(|d| d.prescriptions.iter()) {
                if p.rpe == Some(10.0) {
                    assert_eq!(p.estimated_max, Some(p.weight));
                }
            }
        }
    }

    #[test]
    fn test_deload_accessories_only_on_deload_weeks() {
        let program = reference_program();
        let deload = deload_accessories();
        for week in &program {
            assert_eq!(week.accessories == deload, week.week % 4 == 0);
            assert_eq!(week.is_deload(), week.week % 4 == 0);
        }
    }

    #[test]
    fn test_estimates_scale_with_inputs() {
        let light = generate_program(80.0, 70.0, 72.5);
        let heavy = generate_program(160.0, 140.0, 145.0);
        let final_light = light[11].day(3).unwrap().prescriptions[0].weight;
        let final_heavy = heavy[11].day(3).unwrap().prescriptions[0].weight;
        assert!(final_heavy > final_light);
    }

    #[test]
    fn test_training_maxes_generate() {
        let maxes = TrainingMaxes::new(90.0, 80.0, 80.0).unwrap();
        assert_eq!(maxes.generate(), generate_program(90.0, 80.0, 80.0));
    }

    #[test]
    fn test_table_records_every_estimate_once() {
        let mut engine = ProgramEngine::new(90.0, 80.0, 80.0);
        for week in PROGRAM.iter() {
            engine.week(week);
        }
        let recorded = PROGRAM
            .iter()
            .flat_map(|w| w.days.iter().flat_map(|d| d.iter()))
            .filter(|s| s.effort.records_estimate())
            .count();
        assert_eq!(engine.table.len(), recorded);
    }
}
