//! Estimation and rounding primitives.
//!
//! Everything the generator computes goes through these few functions. Values
//! are kept in full precision until they are written into a prescription.

/// Length of a block, including its deload week
pub const BLOCK_LENGTH: u8 = 4;

/// Estimated 1RM from a set of `reps` at `weight` kg and `rpe`.
///
/// `weight * (reps + 10 - rpe) / 33 + weight`, evaluated without rounding.
pub fn estimated_1rm(weight: f64, reps: u32, rpe: f64) -> f64 {
    weight * (reps as f64 + 10.0 - rpe) / 33.0 + weight
}

/// Round to one decimal place (ties away from zero)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest loadable increment (e.g. 0.5 kg plates)
///
/// Non-positive increments leave the value untouched.
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}

/// Weeks 4, 8 and 12 are deloads
pub fn is_deload_week(week: u8) -> bool {
    week % BLOCK_LENGTH == 0
}
