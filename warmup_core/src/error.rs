//! Error types for the warmup_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for warmup_core operations
///
/// The warmup engine itself never returns one of these: invalid engine input
/// degrades to an empty protocol or a missing estimate. Errors only come from
/// the edges (files, config, parsing user input, the exercise library).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A string could not be parsed into one of the domain enumerations
    #[error("Parse error: {0}")]
    Parse(String),

    /// Exercise library error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// An exercise with the same name (case-insensitive) already exists
    #[error("Exercise '{0}' already exists in the library")]
    DuplicateExercise(String),

    /// No exercise with the given name
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
