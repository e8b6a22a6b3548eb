//! Controller constants shared by integration, clamping and settings defaults.
//!
//! Angles are in degrees and distances in host world units.

/// Speed in units per second applied per unit of input when no acceleration
/// is configured.
pub const INSTANT_SPEED: f32 = 1000.0;
/// Magnitude of the pitch clamp applied after each pose update.
pub const PITCH_LIMIT_DEGREES: f32 = 90.0;
/// Default acceleration. Zero selects instantaneous velocity changes.
pub const DEFAULT_ACCELERATION: f32 = 0.0;
/// Tolerance below which a scalar counts as zero.
///
/// Input magnitudes, axis values and the acceleration constant are all
/// compared against this value.
pub const NEARLY_ZERO: f32 = 1e-8;
