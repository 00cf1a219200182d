#![forbid(unsafe_code)]

//! Core domain model and business logic for the warmup calculator.
//!
//! This crate provides:
//! - Domain types (exercise taxonomy, units, levels, warmup sets)
//! - Warmup engine and one-rep-max estimate
//! - Exercise library and custom exercise persistence
//! - Preferences/configuration
//! - CSV and JSON export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod export;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{built_in_exercises, ExerciseLibrary};
pub use config::{Config, Preferences};
pub use store::ExerciseStore;
pub use engine::{compute_warmup_sets, estimate_one_rep_max, heavy_threshold, round_weight};
