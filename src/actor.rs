//! Host actor abstraction.
//!
//! The controller never owns the actor it drives. Hosts hand it an
//! [`ActorHandle`], keep their own clone, and observe the transform the
//! controller writes back each frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use log::debug;

use crate::pose::{Pose, Rotator};

/// Transform sink driven by the controller.
pub trait PoseActor {
    /// Current world location.
    fn actor_location(&self) -> Vec3;

    /// Current world rotation.
    fn actor_rotation(&self) -> Rotator;

    /// Replaces location and rotation in one step.
    fn set_actor_location_and_rotation(&mut self, location: Vec3, rotation: Rotator);

    /// Asks the host to route input to this actor.
    ///
    /// Hosts without per-actor input gating can rely on the default no-op.
    fn enable_input(&mut self) {}
}

/// Shared, externally owned actor reference.
pub type ActorHandle = Rc<RefCell<dyn PoseActor>>;

/// Plain in-memory actor holding a pose.
///
/// Used by headless replays and as the proxy the Bevy integration mirrors
/// into an entity's `Transform`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformActor {
    /// Pose last written by the controller or set by the host.
    pub pose: Pose,
    /// Whether [`PoseActor::enable_input`] has been called.
    pub input_enabled: bool,
}

impl TransformActor {
    /// Creates an actor placed at `pose` with input disabled.
    #[must_use]
    pub const fn new(pose: Pose) -> Self {
        Self {
            pose,
            input_enabled: false,
        }
    }

    /// Wraps the actor in a shared cell so it can be handed to a controller
    /// while the caller keeps typed access.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl PoseActor for TransformActor {
    fn actor_location(&self) -> Vec3 {
        self.pose.position
    }

    fn actor_rotation(&self) -> Rotator {
        self.pose.rotation
    }

    fn set_actor_location_and_rotation(&mut self, location: Vec3, rotation: Rotator) {
        self.pose = Pose::new(location, rotation);
    }

    fn enable_input(&mut self) {
        if !self.input_enabled {
            debug!("input enabled for actor at {:?}", self.pose.position);
        }
        self.input_enabled = true;
    }
}
