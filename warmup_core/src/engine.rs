//! Warmup engine for turning a working weight into warmup sets.
//!
//! This module implements the warmup protocols:
//! - Optional empty-bar set for barbell lifts
//! - Step tables per warmup model, classification and experience level
//! - Unit/equipment-aware rounding with duplicate collapse
//! - Brzycki one-rep-max estimate
//!
//! Everything here is pure: no I/O, no shared state, no config lookups.

use crate::{
    EquipmentKind, Exercise, ExerciseClassification, ExperienceLevel, SetNote, WarmupModel,
    WarmupSet, WeightUnit,
};

/// Rounded weights closer than this are considered the same load
const DUPLICATE_TOLERANCE: f64 = 0.01;

/// Beyond this rep count the Brzycki denominator collapses
const MAX_ESTIMATE_REPS: u32 = 36;

/// A single step of a protocol before it is turned into a real load
#[derive(Clone, Debug, PartialEq)]
struct WarmupStep {
    fraction: f64,
    reps: u32,
    note: Option<SetNote>,
}

impl WarmupStep {
    fn new(fraction: f64, reps: u32) -> Self {
        Self {
            fraction,
            reps,
            note: None,
        }
    }

    fn noted(fraction: f64, reps: u32, note: SetNote) -> Self {
        Self {
            fraction,
            reps,
            note: Some(note),
        }
    }
}

/// Compute the warmup sets leading up to `working_weight`
///
/// ## Protocol
///
/// 1. **Empty bar** (barbell only): set #1 at the unit's bar weight
/// 2. **Step table**: chosen by `model`, keyed on classification and level
/// 3. **Materialization**: each step is rounded to loadable plates; a step
///    landing on the same load as the previous set is dropped
///
/// Returns an empty protocol when there is no exercise or the working
/// weight is not a finite positive number.
pub fn compute_warmup_sets(
    working_weight: f64,
    exercise: Option<&Exercise>,
    model: WarmupModel,
    level: ExperienceLevel,
    unit: WeightUnit,
) -> Vec<WarmupSet> {
    let exercise = match exercise {
        Some(exercise) if working_weight.is_finite() && working_weight > 0.0 => exercise,
        _ => return Vec::new(),
    };

    let mut sets: Vec<WarmupSet> = Vec::new();

    if exercise.equipment == EquipmentKind::Barbell {
        let bar = unit.bar_weight();
        sets.push(WarmupSet {
            set_number: 1,
            weight: bar,
            reps: if level == ExperienceLevel::Advanced { 10 } else { 8 },
            percentage_of_working_weight: clamp_percentage(bar / working_weight * 100.0),
            note: Some(SetNote::EmptyBar),
        });
    }

    let steps = match model {
        WarmupModel::Progressive => {
            progressive_steps(exercise.classification, level, working_weight, unit)
        }
        WarmupModel::Potentiation => {
            potentiation_steps(exercise.classification, level, working_weight, unit)
        }
    };

    for step in steps {
        let weight = round_weight(working_weight * step.fraction, unit, exercise.equipment);

        if let Some(last) = sets.last() {
            if (last.weight - weight).abs() < DUPLICATE_TOLERANCE {
                tracing::debug!(
                    "Dropping {:.0}% step: rounds to {} {}, same as set {}",
                    step.fraction * 100.0,
                    weight,
                    unit,
                    last.set_number
                );
                continue;
            }
        }

        sets.push(WarmupSet {
            set_number: sets.len() as u32 + 1,
            weight,
            reps: step.reps,
            percentage_of_working_weight: clamp_percentage(step.fraction * 100.0),
            note: step.note,
        });
    }

    sets
}

/// Estimate a one-rep max with the Brzycki formula
///
/// Returns None for a weight that is not finite and positive, zero reps,
/// or more than 36 reps.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> Option<f64> {
    if !weight.is_finite() || weight <= 0.0 || reps == 0 || reps > MAX_ESTIMATE_REPS {
        return None;
    }
    Some(weight * 36.0 / (37.0 - reps as f64))
}

/// Round a raw load to the nearest loadable increment
///
/// Increment is 2.5 kg or 5 lb. The result is never below one increment.
pub fn round_weight(raw: f64, unit: WeightUnit, equipment: EquipmentKind) -> f64 {
    let increment = match equipment {
        EquipmentKind::Barbell => plate_increment(unit),
        EquipmentKind::Dumbbell => plate_increment(unit),
        EquipmentKind::Machine => plate_increment(unit),
    };

    let rounded = (raw / increment).round() * increment;
    rounded.max(increment)
}

/// Working weight from which heavy singles are added, scaled by level
pub fn heavy_threshold(unit: WeightUnit, level: ExperienceLevel) -> f64 {
    let base = unit.heavy_load_base();
    match level {
        ExperienceLevel::Beginner => base * 1.1,
        ExperienceLevel::Intermediate => base,
        ExperienceLevel::Advanced => base * 0.88,
    }
}

fn plate_increment(unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kilograms => 2.5,
        WeightUnit::Pounds => 5.0,
    }
}

fn clamp_percentage(percent: f64) -> u8 {
    percent.round().clamp(0.0, 100.0) as u8
}

fn progressive_steps(
    classification: ExerciseClassification,
    level: ExperienceLevel,
    working_weight: f64,
    unit: WeightUnit,
) -> Vec<WarmupStep> {
    let include_heavy_single =
        working_weight >= heavy_threshold(unit, level) || level == ExperienceLevel::Advanced;

    match classification {
        ExerciseClassification::Compound => {
            let mut steps = vec![WarmupStep::new(0.5, 8)];

            if level == ExperienceLevel::Advanced {
                steps.push(WarmupStep::noted(0.6, 6, SetNote::ExtraActivation));
            }

            steps.push(WarmupStep::new(0.7, 5));
            steps.push(WarmupStep::new(0.8, 3));

            if level != ExperienceLevel::Beginner {
                steps.push(WarmupStep::noted(0.9, 1, SetNote::TechnicalSingle));
            }

            if include_heavy_single {
                steps.push(WarmupStep::noted(0.95, 1, SetNote::NeuromuscularPotentiation));
            }

            steps
        }
        ExerciseClassification::SecondaryCompound | ExerciseClassification::MachineAssisted => {
            let mut steps = vec![WarmupStep::new(0.5, 8), WarmupStep::new(0.7, 4)];

            if level != ExperienceLevel::Beginner {
                steps.push(WarmupStep::new(0.8, 3));
            }

            if level == ExperienceLevel::Advanced {
                steps.push(WarmupStep::noted(0.9, 1, SetNote::LightSingle));
            }

            steps
        }
        ExerciseClassification::Isolation => {
            let mut steps = vec![WarmupStep::new(0.5, 12)];

            if level != ExperienceLevel::Beginner {
                steps.push(WarmupStep::new(0.65, 8));
            }

            if level == ExperienceLevel::Advanced {
                steps.push(WarmupStep::new(0.75, 6));
            }

            steps
        }
    }
}

fn potentiation_steps(
    classification: ExerciseClassification,
    level: ExperienceLevel,
    working_weight: f64,
    unit: WeightUnit,
) -> Vec<WarmupStep> {
    let advanced = level == ExperienceLevel::Advanced;
    let include_heavy_single = advanced && working_weight >= heavy_threshold(unit, level);

    match classification {
        ExerciseClassification::Compound => {
            let second = match level {
                ExperienceLevel::Beginner => 0.7,
                ExperienceLevel::Intermediate => 0.8,
                ExperienceLevel::Advanced => 0.85,
            };

            let mut steps = vec![
                WarmupStep::new(0.5, if advanced { 6 } else { 8 }),
                WarmupStep::new(second, if advanced { 3 } else { 5 }),
            ];

            if include_heavy_single {
                steps.push(WarmupStep::noted(0.92, 1, SetNote::PotentiationSingle));
            }

            steps
        }
        ExerciseClassification::SecondaryCompound | ExerciseClassification::MachineAssisted => {
            let second = if level == ExperienceLevel::Beginner {
                0.7
            } else {
                0.78
            };
            vec![
                WarmupStep::new(0.5, 8),
                WarmupStep::new(second, if advanced { 4 } else { 5 }),
            ]
        }
        ExerciseClassification::Isolation => match level {
            ExperienceLevel::Beginner => vec![WarmupStep::new(0.5, 12)],
            ExperienceLevel::Intermediate => {
                vec![WarmupStep::new(0.5, 12), WarmupStep::new(0.65, 10)]
            }
            ExperienceLevel::Advanced => vec![WarmupStep::new(0.5, 12), WarmupStep::new(0.7, 8)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];
    const MODELS: [WarmupModel; 2] = [WarmupModel::Progressive, WarmupModel::Potentiation];
    const UNITS: [WeightUnit; 2] = [WeightUnit::Kilograms, WeightUnit::Pounds];
    const EQUIPMENT: [EquipmentKind; 3] = [
        EquipmentKind::Barbell,
        EquipmentKind::Dumbbell,
        EquipmentKind::Machine,
    ];

    fn exercise(classification: ExerciseClassification, equipment: EquipmentKind) -> Exercise {
        Exercise::new("Test Lift", classification, equipment)
    }

    fn summary(sets: &[WarmupSet]) -> Vec<(f64, u32, u8, Option<&'static str>)> {
        sets.iter()
            .map(|s| {
                (
                    s.weight,
                    s.reps,
                    s.percentage_of_working_weight,
                    s.note.map(|n| n.label()),
                )
            })
            .collect()
    }

    /// Every combination of inputs over a spread of working weights
    fn for_all_inputs(mut check: impl FnMut(&[WarmupSet], f64, WeightUnit)) {
        let weights = [1.0, 7.5, 20.0, 22.5, 40.0, 61.0, 100.0, 143.0, 200.0, 315.0, 500.0];
        for classification in ExerciseClassification::ALL {
            for equipment in EQUIPMENT {
                let ex = exercise(classification, equipment);
                for model in MODELS {
                    for level in LEVELS {
                        for unit in UNITS {
                            for weight in weights {
                                let sets =
                                    compute_warmup_sets(weight, Some(&ex), model, level, unit);
                                check(&sets, weight, unit);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_intermediate_compound_progressive_100kg() {
        crate::logging::init_test();
        let squat = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            100.0,
            Some(&squat),
            WarmupModel::Progressive,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );

        assert_eq!(
            summary(&sets),
            vec![
                (20.0, 8, 20, Some("empty bar")),
                (50.0, 8, 50, None),
                (70.0, 5, 70, None),
                (80.0, 3, 80, None),
                (90.0, 1, 90, Some("technical single")),
            ]
        );
        let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_advanced_compound_progressive_includes_heavy_single() {
        let squat = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            150.0,
            Some(&squat),
            WarmupModel::Progressive,
            ExperienceLevel::Advanced,
            WeightUnit::Kilograms,
        );

        assert_eq!(
            summary(&sets),
            vec![
                (20.0, 10, 13, Some("empty bar")),
                (75.0, 8, 50, None),
                (90.0, 6, 60, Some("extra activation")),
                (105.0, 5, 70, None),
                (120.0, 3, 80, None),
                (135.0, 1, 90, Some("technical single")),
                (142.5, 1, 95, Some("neuromuscular potentiation")),
            ]
        );
    }

    #[test]
    fn test_heavy_single_follows_threshold_for_intermediate() {
        let squat = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let light = compute_warmup_sets(
            142.5,
            Some(&squat),
            WarmupModel::Progressive,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );
        let heavy = compute_warmup_sets(
            143.0,
            Some(&squat),
            WarmupModel::Progressive,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );

        assert!(light
            .iter()
            .all(|s| s.note != Some(SetNote::NeuromuscularPotentiation)));
        assert_eq!(
            heavy.last().and_then(|s| s.note),
            Some(SetNote::NeuromuscularPotentiation)
        );
    }

    #[test]
    fn test_beginner_compound_progressive_in_pounds() {
        let bench = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            135.0,
            Some(&bench),
            WarmupModel::Progressive,
            ExperienceLevel::Beginner,
            WeightUnit::Pounds,
        );

        // 50% of 135 = 67.5 -> 70, 70% = 94.5 -> 95, 80% = 108 -> 110
        assert_eq!(
            summary(&sets),
            vec![
                (45.0, 8, 33, Some("empty bar")),
                (70.0, 8, 50, None),
                (95.0, 5, 70, None),
                (110.0, 3, 80, None),
            ]
        );
    }

    #[test]
    fn test_isolation_dumbbell_potentiation_beginner_40kg() {
        let curl = exercise(ExerciseClassification::Isolation, EquipmentKind::Dumbbell);
        let sets = compute_warmup_sets(
            40.0,
            Some(&curl),
            WarmupModel::Potentiation,
            ExperienceLevel::Beginner,
            WeightUnit::Kilograms,
        );

        assert_eq!(summary(&sets), vec![(20.0, 12, 50, None)]);
        assert_eq!(sets[0].set_number, 1);
    }

    #[test]
    fn test_potentiation_compound_levels() {
        let deadlift = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);

        let intermediate = compute_warmup_sets(
            200.0,
            Some(&deadlift),
            WarmupModel::Potentiation,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&intermediate),
            vec![
                (20.0, 8, 10, Some("empty bar")),
                (100.0, 8, 50, None),
                (160.0, 5, 80, None),
            ]
        );

        let advanced = compute_warmup_sets(
            200.0,
            Some(&deadlift),
            WarmupModel::Potentiation,
            ExperienceLevel::Advanced,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&advanced),
            vec![
                (20.0, 10, 10, Some("empty bar")),
                (100.0, 6, 50, None),
                (170.0, 3, 85, None),
                (185.0, 1, 92, Some("potentiation single")),
            ]
        );
    }

    #[test]
    fn test_potentiation_single_needs_heavy_load() {
        let deadlift = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            100.0,
            Some(&deadlift),
            WarmupModel::Potentiation,
            ExperienceLevel::Advanced,
            WeightUnit::Kilograms,
        );
        assert!(sets.iter().all(|s| s.note != Some(SetNote::PotentiationSingle)));
    }

    #[test]
    fn test_secondary_and_machine_share_tables() {
        let row = exercise(ExerciseClassification::SecondaryCompound, EquipmentKind::Machine);
        let press = exercise(ExerciseClassification::MachineAssisted, EquipmentKind::Machine);

        for model in MODELS {
            for level in LEVELS {
                let a = compute_warmup_sets(80.0, Some(&row), model, level, WeightUnit::Kilograms);
                let b =
                    compute_warmup_sets(80.0, Some(&press), model, level, WeightUnit::Kilograms);
                assert_eq!(a, b);
            }
        }

        let advanced = compute_warmup_sets(
            80.0,
            Some(&row),
            WarmupModel::Progressive,
            ExperienceLevel::Advanced,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&advanced),
            vec![
                (40.0, 8, 50, None),
                (55.0, 4, 70, None),
                (65.0, 3, 80, None),
                (72.5, 1, 90, Some("light single")),
            ]
        );
    }

    #[test]
    fn test_isolation_potentiation_intermediate_and_advanced() {
        let extension = exercise(ExerciseClassification::Isolation, EquipmentKind::Machine);

        let intermediate = compute_warmup_sets(
            60.0,
            Some(&extension),
            WarmupModel::Potentiation,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&intermediate),
            vec![(30.0, 12, 50, None), (40.0, 10, 65, None)]
        );

        let advanced = compute_warmup_sets(
            60.0,
            Some(&extension),
            WarmupModel::Potentiation,
            ExperienceLevel::Advanced,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&advanced),
            vec![(30.0, 12, 50, None), (42.5, 8, 70, None)]
        );
    }

    #[test]
    fn test_collapsed_steps_are_dropped() {
        // 50% of 40 kg rounds to 20 kg, the same load as the empty bar
        let press = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            40.0,
            Some(&press),
            WarmupModel::Progressive,
            ExperienceLevel::Beginner,
            WeightUnit::Kilograms,
        );
        assert_eq!(
            summary(&sets),
            vec![
                (20.0, 8, 50, Some("empty bar")),
                (27.5, 5, 70, None),
                (32.5, 3, 80, None),
            ]
        );
        let numbers: Vec<u32> = sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_light_bar_percentage_is_clamped() {
        let press = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        let sets = compute_warmup_sets(
            10.0,
            Some(&press),
            WarmupModel::Progressive,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        );
        assert_eq!(sets[0].percentage_of_working_weight, 100);
        assert_eq!(sets[0].note, Some(SetNote::EmptyBar));
    }

    #[test]
    fn test_invalid_input_returns_empty() {
        let squat = exercise(ExerciseClassification::Compound, EquipmentKind::Barbell);
        for weight in [0.0, -1.0, -100.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(compute_warmup_sets(
                weight,
                Some(&squat),
                WarmupModel::Progressive,
                ExperienceLevel::Intermediate,
                WeightUnit::Kilograms,
            )
            .is_empty());
        }
        assert!(compute_warmup_sets(
            100.0,
            None,
            WarmupModel::Progressive,
            ExperienceLevel::Intermediate,
            WeightUnit::Kilograms,
        )
        .is_empty());
    }

    #[test]
    fn test_set_numbers_are_contiguous() {
        for_all_inputs(|sets, _, _| {
            for (index, set) in sets.iter().enumerate() {
                assert_eq!(set.set_number, index as u32 + 1);
            }
        });
    }

    #[test]
    fn test_percentages_within_bounds() {
        for_all_inputs(|sets, _, _| {
            assert!(sets.iter().all(|s| s.percentage_of_working_weight <= 100));
        });
    }

    #[test]
    fn test_no_consecutive_duplicate_weights() {
        for_all_inputs(|sets, weight, unit| {
            for pair in sets.windows(2) {
                assert!(
                    (pair[0].weight - pair[1].weight).abs() >= DUPLICATE_TOLERANCE,
                    "duplicate load {} {} for working weight {}",
                    pair[1].weight,
                    unit,
                    weight
                );
            }
        });
    }

    #[test]
    fn test_protocols_are_non_empty_for_valid_input() {
        for_all_inputs(|sets, _, _| {
            assert!(!sets.is_empty());
            assert!(sets.iter().all(|s| s.reps > 0 && s.weight > 0.0));
        });
    }

    #[test]
    fn test_round_weight() {
        assert_eq!(round_weight(67.5, WeightUnit::Kilograms, EquipmentKind::Barbell), 67.5);
        assert_eq!(round_weight(68.7, WeightUnit::Kilograms, EquipmentKind::Barbell), 67.5);
        assert_eq!(round_weight(68.75, WeightUnit::Kilograms, EquipmentKind::Dumbbell), 70.0);
        assert_eq!(round_weight(67.5, WeightUnit::Pounds, EquipmentKind::Machine), 70.0);
        assert_eq!(round_weight(0.4, WeightUnit::Kilograms, EquipmentKind::Dumbbell), 2.5);
        assert_eq!(round_weight(1.0, WeightUnit::Pounds, EquipmentKind::Barbell), 5.0);
    }

    #[test]
    fn test_round_weight_is_idempotent() {
        for unit in UNITS {
            for equipment in EQUIPMENT {
                let mut raw = 0.3;
                while raw < 400.0 {
                    let once = round_weight(raw, unit, equipment);
                    let twice = round_weight(once, unit, equipment);
                    assert_eq!(once, twice, "raw {} {}", raw, unit);
                    raw += 0.7;
                }
            }
        }
    }

    #[test]
    fn test_heavy_threshold_scaling() {
        let advanced = heavy_threshold(WeightUnit::Kilograms, ExperienceLevel::Advanced);
        assert!((advanced - 125.84).abs() < 1e-9);
        assert_eq!(
            heavy_threshold(WeightUnit::Kilograms, ExperienceLevel::Intermediate),
            143.0
        );
        let beginner = heavy_threshold(WeightUnit::Pounds, ExperienceLevel::Beginner);
        assert!((beginner - 346.5).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_one_rep_max() {
        assert_eq!(estimate_one_rep_max(100.0, 1), Some(100.0));
        assert_eq!(estimate_one_rep_max(100.0, 37), None);
        assert_eq!(estimate_one_rep_max(-5.0, 5), None);
        assert_eq!(estimate_one_rep_max(0.0, 5), None);
        assert_eq!(estimate_one_rep_max(100.0, 0), None);
        assert_eq!(estimate_one_rep_max(f64::INFINITY, 5), None);
        assert_eq!(estimate_one_rep_max(f64::NAN, 5), None);

        let five = estimate_one_rep_max(100.0, 5).unwrap();
        assert!((five - 112.5).abs() < 1e-9);

        let limit = estimate_one_rep_max(10.0, 36).unwrap();
        assert!((limit - 360.0).abs() < 1e-9);
    }
}
