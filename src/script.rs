//! Scripted flights.
//!
//! A script is a start pose plus a list of frames, each carrying a time step
//! and the axis values held during it. Replaying a script drives a fresh
//! controller exactly as a host would: axis values go through an
//! [`AxisRouter`], then the pose is updated and recorded.
//!
//! ```json
//! {
//!   "start": { "position": [0.0, 0.0, 0.0], "rotation": { "yaw": 90.0 } },
//!   "frames": [
//!     { "dt": 0.1, "axes": { "MoveForward": 1.0 } },
//!     { "dt": 0.1, "axes": { "RotateRight": 5.0 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::actor::TransformActor;
use crate::controller::ManualPoseController;
use crate::error::ScriptError;
use crate::input::{AxisFrame, AxisRouter};
use crate::pose::Pose;
use crate::settings::ControllerSettings;

/// One frame of held input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Elapsed seconds for the frame.
    pub dt: f32,
    /// Axis values held during the frame. Missing axes read as zero.
    #[serde(default)]
    pub axes: AxisFrame,
}

/// A start pose and the frames to fly from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightScript {
    /// Pose of the actor before the first frame.
    #[serde(default)]
    pub start: Pose,
    /// Frames replayed in order.
    pub frames: Vec<ScriptFrame>,
}

impl FlightScript {
    /// Parses a script from JSON and validates its frames.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] for malformed documents and
    /// [`ScriptError::InvalidFrame`] for negative or non-finite time steps.
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Reads a script from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] when the file cannot be read, otherwise the
    /// same errors as [`FlightScript::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects frames whose time step is negative or not finite.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidFrame`] for the first bad frame.
    pub fn validate(&self) -> Result<(), ScriptError> {
        match self
            .frames
            .iter()
            .enumerate()
            .find(|(_, frame)| !frame.dt.is_finite() || frame.dt < 0.0)
        {
            Some((index, frame)) => Err(ScriptError::InvalidFrame {
                index,
                dt: frame.dt,
            }),
            None => Ok(()),
        }
    }
}

/// Flies `script` with a fresh controller and returns the pose after each
/// frame.
///
/// # Errors
///
/// Returns [`ScriptError::InvalidFrame`] when the script fails validation
/// and [`ScriptError::Settings`] when `settings` are out of range.
pub fn replay(
    script: &FlightScript,
    settings: ControllerSettings,
) -> Result<Vec<Pose>, ScriptError> {
    script.validate()?;

    let router = AxisRouter::shared();
    let actor = TransformActor::new(script.start).shared();
    let mut controller = ManualPoseController::new(settings)?;
    controller.initialize_for_play(router.clone());
    controller.set_actor(Some(actor.clone()))?;

    let mut poses = Vec::with_capacity(script.frames.len());
    for (index, frame) in script.frames.iter().enumerate() {
        router.borrow().dispatch_frame(&mut controller, &frame.axes);
        controller.update_actor_pose(frame.dt);
        let pose = actor.borrow().pose;
        debug!("frame {index}: {pose:?}");
        poses.push(pose);
    }

    controller.set_actor(None)?;
    info!("replayed {} frames", poses.len());
    Ok(poses)
}
