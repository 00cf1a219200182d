//! Exercise library: built-in exercises plus user-added ones.
//!
//! The library only supplies exercises to the warmup engine; it never
//! computes anything itself.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached built-in exercises - built once and reused across all operations
static BUILT_IN_EXERCISES: Lazy<Vec<Exercise>> = Lazy::new(build_built_in_exercises);

/// Get a reference to the cached built-in exercises
pub fn built_in_exercises() -> &'static [Exercise] {
    &BUILT_IN_EXERCISES
}

fn build_built_in_exercises() -> Vec<Exercise> {
    use EquipmentKind::*;
    use ExerciseClassification::*;

    let entries: [(&str, ExerciseClassification, EquipmentKind); 24] = [
        ("Back Squat", Compound, Barbell),
        ("Front Squat", Compound, Barbell),
        ("Bench Press", Compound, Barbell),
        ("Incline Bench Press", SecondaryCompound, Barbell),
        ("Deadlift", Compound, Barbell),
        ("Romanian Deadlift", SecondaryCompound, Barbell),
        ("Overhead Press", Compound, Barbell),
        ("Barbell Row", SecondaryCompound, Barbell),
        ("Pull-Up", Compound, Machine),
        ("Lat Pulldown", SecondaryCompound, Machine),
        ("Leg Press", Compound, Machine),
        ("Hack Squat", Compound, Machine),
        ("Dip", SecondaryCompound, Machine),
        ("Seated Cable Row", SecondaryCompound, Machine),
        ("Dumbbell Bench Press", SecondaryCompound, Dumbbell),
        ("Goblet Squat", SecondaryCompound, Dumbbell),
        ("Biceps Curl", Isolation, Dumbbell),
        ("Hammer Curl", Isolation, Dumbbell),
        ("Triceps Extension", Isolation, Machine),
        ("Leg Extension", Isolation, Machine),
        ("Leg Curl", Isolation, Machine),
        ("Lateral Raise", Isolation, Dumbbell),
        ("Calf Raise", Isolation, Machine),
        ("Face Pull", Isolation, Machine),
    ];

    entries
        .into_iter()
        .map(|(name, classification, equipment)| Exercise::new(name, classification, equipment))
        .collect()
}

/// Built-in exercises together with the user's custom ones
#[derive(Clone, Debug)]
pub struct ExerciseLibrary {
    built_in: Vec<Exercise>,
    custom: Vec<Exercise>,
}

impl Default for ExerciseLibrary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExerciseLibrary {
    /// Create a library from the built-in exercises and previously saved custom ones
    pub fn new(mut custom: Vec<Exercise>) -> Self {
        sort_by_name(&mut custom);
        Self {
            built_in: built_in_exercises().to_vec(),
            custom,
        }
    }

    pub fn custom_exercises(&self) -> &[Exercise] {
        &self.custom
    }

    /// All exercises, alphabetically (case-insensitive)
    pub fn all_exercises(&self) -> Vec<&Exercise> {
        let mut all: Vec<&Exercise> = self.built_in.iter().chain(self.custom.iter()).collect();
        all.sort_by_key(|e| e.name.to_lowercase());
        all
    }

    pub fn exercises_by(&self, classification: ExerciseClassification) -> Vec<&Exercise> {
        self.all_exercises()
            .into_iter()
            .filter(|e| e.classification == classification)
            .collect()
    }

    /// Find an exercise by name, ignoring case and surrounding whitespace
    pub fn find(&self, name: &str) -> Option<&Exercise> {
        let wanted = name.trim().to_lowercase();
        self.built_in
            .iter()
            .chain(self.custom.iter())
            .find(|e| e.name.to_lowercase() == wanted)
    }

    /// Like [`find`](Self::find) but an unknown name is an error
    pub fn require(&self, name: &str) -> Result<&Exercise> {
        self.find(name)
            .ok_or_else(|| Error::UnknownExercise(name.trim().to_string()))
    }

    pub fn is_custom(&self, exercise: &Exercise) -> bool {
        self.custom.iter().any(|e| e.id == exercise.id)
    }

    /// Add a user-defined exercise
    ///
    /// The name is trimmed; empty names and case-insensitive duplicates of
    /// any existing exercise are rejected.
    pub fn add_custom(
        &mut self,
        name: &str,
        classification: ExerciseClassification,
        equipment: EquipmentKind,
    ) -> Result<&Exercise> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Catalog("exercise name cannot be empty".into()));
        }

        if self.find(trimmed).is_some() {
            return Err(Error::DuplicateExercise(trimmed.to_string()));
        }

        let exercise = Exercise::new(trimmed, classification, equipment);
        let id = exercise.id;
        self.custom.push(exercise);
        sort_by_name(&mut self.custom);

        tracing::info!(
            "Added custom exercise '{}' ({}, {})",
            trimmed,
            classification,
            equipment
        );

        self.custom
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::Other("custom exercise vanished after insert".into()))
    }

    /// Validate the library for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();

        for exercise in self.built_in.iter().chain(self.custom.iter()) {
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", exercise.id));
            }
            if !seen_names.insert(exercise.name.to_lowercase()) {
                errors.push(format!("Duplicate exercise name '{}'", exercise.name));
            }
            if !seen_ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
        }

        errors
    }
}

fn sort_by_name(exercises: &mut [Exercise]) {
    exercises.sort_by_key(|e| e.name.to_lowercase());
}
