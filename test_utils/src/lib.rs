//! Utility helpers for tests.
//!
//! Provides a recording actor double and tolerance assertions for poses.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use manual_pose::{ActorHandle, AxisRouter, ManualPoseController, Pose, PoseActor, Rotator};

/// Actor that remembers every pose written to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingActor {
    /// Pose reported to the controller.
    pub pose: Pose,
    /// Every write, oldest first.
    pub writes: Vec<Pose>,
    /// Number of `enable_input` calls.
    pub enable_calls: usize,
}

impl RecordingActor {
    /// Creates a recording actor placed at `pose`.
    ///
    /// # Examples
    /// ```
    /// use manual_pose::Pose;
    /// use test_utils::RecordingActor;
    /// let actor = RecordingActor::at(Pose::ZERO);
    /// assert!(actor.writes.is_empty());
    /// ```
    pub fn at(pose: Pose) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }

    /// Wraps the actor for sharing with a controller.
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl PoseActor for RecordingActor {
    fn actor_location(&self) -> Vec3 {
        self.pose.position
    }

    fn actor_rotation(&self) -> Rotator {
        self.pose.rotation
    }

    fn set_actor_location_and_rotation(&mut self, location: Vec3, rotation: Rotator) {
        self.pose = Pose::new(location, rotation);
        self.writes.push(self.pose);
    }

    fn enable_input(&mut self) {
        self.enable_calls += 1;
    }
}

/// A controller bound to a recording actor through a fresh router.
pub struct Rig {
    /// Controller under test.
    pub controller: ManualPoseController,
    /// Router the controller subscribed through.
    pub router: Rc<RefCell<AxisRouter>>,
    /// Actor the controller drives.
    pub actor: Rc<RefCell<RecordingActor>>,
}

/// Builds a controller already bound to a [`RecordingActor`] at `start`.
///
/// # Panics
/// Panics if binding fails, which only happens when the controller was not
/// initialised.
pub fn bound_rig(mut controller: ManualPoseController, start: Pose) -> Rig {
    let router = AxisRouter::shared();
    let actor = RecordingActor::at(start).shared();
    controller.initialize_for_play(router.clone());
    let handle: ActorHandle = actor.clone();
    controller
        .set_actor(Some(handle))
        .unwrap_or_else(|e| panic!("binding recording actor failed: {e}"));
    Rig {
        controller,
        router,
        actor,
    }
}

/// Assert that two vectors agree within `tolerance` per component.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `tolerance`.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        (actual - expected).abs().max_element() <= tolerance,
        "expected {expected:?}, got {actual:?} (tolerance {tolerance})"
    );
}
