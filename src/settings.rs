//! Runtime configuration for the controller.
//!
//! Settings are plain data so they can be loaded from JSON, overridden from
//! the command line, or inserted directly by a host.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::{DEFAULT_ACCELERATION, INSTANT_SPEED, PITCH_LIMIT_DEGREES};

/// Tunables for velocity integration and pitch clamping.
///
/// # Examples
///
/// ```
/// use manual_pose::ControllerSettings;
///
/// let settings = ControllerSettings::from_json_str(r#"{ "acceleration": 10.0 }"#).unwrap();
/// assert_eq!(settings.acceleration, 10.0);
/// assert_eq!(settings.instant_speed, 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerSettings {
    /// Acceleration in units per second squared per unit of input.
    ///
    /// A value that is nearly zero selects instantaneous motion at
    /// [`ControllerSettings::instant_speed`].
    pub acceleration: f32,
    /// Velocity per unit of input used when acceleration is disabled.
    pub instant_speed: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            instant_speed: INSTANT_SPEED,
            pitch_limit: PITCH_LIMIT_DEGREES,
        }
    }
}

impl ControllerSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON or unknown fields
    /// and [`SettingsError::Invalid`] when a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`ControllerSettings::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).inspect_err(|e| warn!("rejected settings {}: {e}", path.display()))
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.acceleration.is_finite() || self.acceleration < 0.0 {
            return Err(invalid("acceleration", "must be finite and non-negative"));
        }
        if !self.instant_speed.is_finite() || self.instant_speed <= 0.0 {
            return Err(invalid("instant_speed", "must be finite and positive"));
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit <= PITCH_LIMIT_DEGREES) {
            return Err(invalid(
                "pitch_limit",
                format!("must lie in (0, {PITCH_LIMIT_DEGREES}]"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}
