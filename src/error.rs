//! Error types surfaced by the controller, settings loader and script replay.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to bind an actor to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindError {
    /// An actor was supplied before `initialize_for_play` provided an input
    /// source to subscribe through.
    #[error("cannot bind an actor before an input source is initialised")]
    MissingInputSource,
}

/// An axis name the controller does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown axis `{0}`")]
pub struct UnknownAxis(pub String);

/// Failure to load or validate [`ControllerSettings`](crate::ControllerSettings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for the expected shape.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value outside its accepted range.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Failure to load or replay a flight script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The script document is not valid JSON for the expected shape.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
    /// A frame carries an unusable time step.
    #[error("frame {index} has invalid dt {dt}")]
    InvalidFrame {
        /// Zero-based frame position.
        index: usize,
        /// The rejected time step.
        dt: f32,
    },
    /// The replay controller refused to bind its actor.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// The replay settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
