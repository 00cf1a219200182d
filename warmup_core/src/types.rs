//! Core domain types for the warmup calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise taxonomy (classification, equipment)
//! - Weight units and their fixed constants
//! - Lifter experience level and warmup model
//! - Exercises and generated warmup sets

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462262;

// ============================================================================
// Exercise Taxonomy
// ============================================================================

/// How an exercise loads the body; selects the warmup step table
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseClassification {
    Compound,
    SecondaryCompound,
    Isolation,
    MachineAssisted,
}

impl ExerciseClassification {
    pub const ALL: [ExerciseClassification; 4] = [
        ExerciseClassification::Compound,
        ExerciseClassification::SecondaryCompound,
        ExerciseClassification::Isolation,
        ExerciseClassification::MachineAssisted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseClassification::Compound => "compound",
            ExerciseClassification::SecondaryCompound => "secondary_compound",
            ExerciseClassification::Isolation => "isolation",
            ExerciseClassification::MachineAssisted => "machine_assisted",
        }
    }
}

impl fmt::Display for ExerciseClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseClassification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "compound" => Ok(ExerciseClassification::Compound),
            "secondary_compound" | "secondary" | "assistance" => {
                Ok(ExerciseClassification::SecondaryCompound)
            }
            "isolation" => Ok(ExerciseClassification::Isolation),
            "machine_assisted" | "machine" => Ok(ExerciseClassification::MachineAssisted),
            _ => Err(Error::Parse(format!("unknown classification '{}'", s))),
        }
    }
}

/// Equipment an exercise is performed with
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Barbell,
    Dumbbell,
    Machine,
}

impl EquipmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentKind::Barbell => "barbell",
            EquipmentKind::Dumbbell => "dumbbell",
            EquipmentKind::Machine => "machine",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "barbell" | "bar" => Ok(EquipmentKind::Barbell),
            "dumbbell" | "db" => Ok(EquipmentKind::Dumbbell),
            "machine" | "cable" => Ok(EquipmentKind::Machine),
            _ => Err(Error::Parse(format!("unknown equipment '{}'", s))),
        }
    }
}

// ============================================================================
// Units
// ============================================================================

/// Unit system for every weight the caller passes in and gets back
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Pounds => "lbs",
        }
    }

    /// Empty olympic bar: 20 kg / 45 lb
    pub fn bar_weight(&self) -> f64 {
        match self {
            WeightUnit::Kilograms => 20.0,
            WeightUnit::Pounds => 45.0,
        }
    }

    /// Working weight from which a near-maximal single is considered,
    /// before scaling by experience level
    pub fn heavy_load_base(&self) -> f64 {
        match self {
            WeightUnit::Kilograms => 143.0,
            WeightUnit::Pounds => 315.0,
        }
    }

    /// Pounds represented by one of this unit
    pub fn conversion_factor(&self) -> f64 {
        match self {
            WeightUnit::Kilograms => 1.0,
            WeightUnit::Pounds => LBS_PER_KG,
        }
    }

    /// Convert `value` expressed in `self` into `to`
    pub fn convert(&self, value: f64, to: WeightUnit) -> f64 {
        if *self == to {
            return value;
        }
        let kilograms = value / self.conversion_factor();
        kilograms * to.conversion_factor()
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilograms),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pounds),
            _ => Err(Error::Parse(format!("unknown weight unit '{}'", s))),
        }
    }
}

// ============================================================================
// Lifter Profile
// ============================================================================

/// Training experience of the lifter
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "beginner" | "novice" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(Error::Parse(format!("unknown experience level '{}'", s))),
        }
    }
}

/// Warmup protocol family
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WarmupModel {
    /// Gradual ramp with a heavy single near the working weight
    #[default]
    Progressive,
    /// Two quick sets toward ~80-85%
    Potentiation,
}

impl WarmupModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarmupModel::Progressive => "progressive",
            WarmupModel::Potentiation => "potentiation",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            WarmupModel::Progressive => {
                "Gradual ramp in load with a heavy single to wake up the nervous system."
            }
            WarmupModel::Potentiation => "Two quick sets for a short but powerful warmup.",
        }
    }
}

impl fmt::Display for WarmupModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarmupModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "progressive" => Ok(WarmupModel::Progressive),
            "potentiation" | "potentiation80" | "potentiation_80" => {
                Ok(WarmupModel::Potentiation)
            }
            _ => Err(Error::Parse(format!("unknown warmup model '{}'", s))),
        }
    }
}

// ============================================================================
// Exercises and Sets
// ============================================================================

/// A named exercise from the library
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub classification: ExerciseClassification,
    pub equipment: EquipmentKind,
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        classification: ExerciseClassification,
        equipment: EquipmentKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            classification,
            equipment,
        }
    }
}

/// Annotation attached to a warmup set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SetNote {
    EmptyBar,
    ExtraActivation,
    TechnicalSingle,
    NeuromuscularPotentiation,
    LightSingle,
    PotentiationSingle,
}

impl SetNote {
    pub fn label(&self) -> &'static str {
        match self {
            SetNote::EmptyBar => "empty bar",
            SetNote::ExtraActivation => "extra activation",
            SetNote::TechnicalSingle => "technical single",
            SetNote::NeuromuscularPotentiation => "neuromuscular potentiation",
            SetNote::LightSingle => "light single",
            SetNote::PotentiationSingle => "potentiation single",
        }
    }
}

impl fmt::Display for SetNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated warmup set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WarmupSet {
    /// 1-based position in the protocol
    pub set_number: u32,
    /// Load in the caller's unit
    pub weight: f64,
    pub reps: u32,
    /// Intended share of the working weight, 0-100
    pub percentage_of_working_weight: u8,
    pub note: Option<SetNote>,
}

/// Lowercase and fold separators so "Secondary-Compound" == "secondary_compound"
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}
