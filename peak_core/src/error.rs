//! Error types for the peak_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for peak_core operations
///
/// Plan generation itself is total and never produces one of these; they come
/// from input validation and the persistence/export layers around it.
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

    /// A one-rep max input was missing, non-finite or not positive
    #[error("Invalid {lift} max: {value}")]
    InvalidMax { lift: &'static str, value: f64 },

    /// Maxes have not been entered yet, so there is no plan to show
    #[error("Program not started: set your maxes with `peak start`")]
    ProgramNotStarted,

    /// Week/day outside the 12x3 program grid
    #[error("No session at week {week} day {day}")]
    NoSuchSession { week: u8, day: u8 },

    /// Static schedule validation error
    #[error("Schedule validation error: {0}")]
    Schedule(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
