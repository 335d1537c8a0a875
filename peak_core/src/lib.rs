#![forbid(unsafe_code)]

//! Core domain model and program generator for the Peak bench program.
//!
//! This crate provides:
//! - Domain types (lifts, prescriptions, days, weeks, accessories)
//! - The static 12-week schedule and the progression engine over it
//! - Accessory scheduling
//! - Profile and training-log persistence
//! - CSV export

pub mod types;
pub mod error;
pub mod formulas;
pub mod schedule;
pub mod engine;
pub mod accessories;
pub mod config;
pub mod logging;
pub mod profile;
pub mod training_log;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::generate_program;
pub use accessories::accessories_for_week;
pub use profile::{Profile, SessionId, TrainingMaxes};
pub use training_log::{JsonlLogSink, LogSink, TrainingLogEntry};
