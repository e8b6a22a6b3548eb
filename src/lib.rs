#![cfg_attr(docsrs, feature(doc_cfg))]
//! Manual pose control for simulated vehicles and cameras.
//!
//! [`ManualPoseController`] turns normalized axis input into per-frame
//! position and rotation deltas and writes the resulting pose to a host
//! actor. Hosts plug in through the [`PoseActor`] and [`InputSource`] traits;
//! [`plugin::ManualPosePlugin`] wires everything into a Bevy app and
//! [`script::replay`] flies scripted input headlessly.
pub mod actor;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod pose;
pub mod script;
pub mod settings;
pub use constants::*;

// Re-export commonly used items
pub use actor::{ActorHandle, PoseActor, TransformActor};
pub use controller::ManualPoseController;
pub use error::{BindError, ScriptError, SettingsError, UnknownAxis};
pub use input::{Axis, AxisFrame, AxisHandler, AxisRouter, InputHandle, InputSource};
pub use logging::init as init_logging;
pub use plugin::{ManualPosePlugin, ManualPoseTarget};
pub use pose::{Pose, Rotator};
pub use script::{replay, FlightScript, ScriptFrame};
pub use settings::ControllerSettings;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use manual_pose::prelude::*;
    //! ```

    pub use crate::{
        Axis, AxisRouter, ControllerSettings, ManualPoseController, ManualPosePlugin,
        ManualPoseTarget, Pose, PoseActor, Rotator, TransformActor,
    };
    pub use glam::Vec3;
}
