//! Manual pose controller.
//!
//! Integrates per-frame axis input into a pose delta and writes the result
//! to a bound host actor. The host drives everything from one thread: axis
//! handlers fire as input arrives and [`ManualPoseController::update_actor_pose`]
//! runs once per frame.

use glam::Vec3;
use log::{debug, error, trace};

use crate::actor::ActorHandle;
use crate::error::{BindError, SettingsError};
use crate::input::{Axis, AxisHandler, InputHandle};
use crate::numeric::{is_nearly_zero, is_nearly_zero_vec};
use crate::pose::{Pose, Rotator};
use crate::settings::ControllerSettings;
use crate::NEARLY_ZERO;

/// Axis subscriptions registered for every bound actor.
const AXIS_BINDINGS: [(Axis, AxisHandler); 5] = [
    (Axis::MoveForward, ManualPoseController::input_forward),
    (Axis::MoveDown, ManualPoseController::input_down),
    (Axis::MoveRight, ManualPoseController::input_right),
    (Axis::RotateRight, ManualPoseController::input_yaw_rate),
    (Axis::RotateDown, ManualPoseController::input_pitch_rate),
];

/// Flies a host actor from normalized axis input.
///
/// Input bindings exist exactly while an actor is bound. The pending delta
/// is cleared after every applied update and whenever a new actor is bound.
///
/// # Examples
///
/// ```
/// use manual_pose::{AxisRouter, ManualPoseController, Pose, TransformActor};
///
/// let router = AxisRouter::shared();
/// let actor = TransformActor::new(Pose::ZERO).shared();
///
/// let mut controller = ManualPoseController::default();
/// controller.initialize_for_play(router.clone());
/// controller.set_actor(Some(actor.clone())).unwrap();
///
/// controller.input_forward(1.0);
/// controller.update_actor_pose(0.1);
/// assert!((actor.borrow().pose.position.x - 100.0).abs() < 1e-3);
/// ```
#[derive(Default)]
pub struct ManualPoseController {
    settings: ControllerSettings,
    input: Option<InputHandle>,
    actor: Option<ActorHandle>,
    pose: Pose,
    delta: Pose,
    last_velocity: Vec3,
    move_input: Vec3,
}

impl ManualPoseController {
    /// Creates an unbound controller using `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] when `settings` fail
    /// [`ControllerSettings::validate`].
    pub fn new(settings: ControllerSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    /// Prepares the controller for a play session.
    ///
    /// Stores the host input source, unbinds any bound actor and zeroes the
    /// carried velocity. The previous actor's subscriptions are removed from
    /// the input source they were made on.
    pub fn initialize_for_play(&mut self, input: InputHandle) {
        if self.actor.take().is_some() {
            self.remove_input_bindings();
        }
        self.input = Some(input);
        self.last_velocity = Vec3::ZERO;
    }

    /// Binds `actor`, replacing any previously bound one.
    ///
    /// The previous actor's axis subscriptions are removed first. Passing
    /// `None` only unbinds. For a new actor the delta is reset, all five axes
    /// are subscribed, the actor is asked to accept input and its current
    /// transform becomes the baseline pose.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::MissingInputSource`] when binding an actor before
    /// [`ManualPoseController::initialize_for_play`]. State is left untouched.
    pub fn set_actor(&mut self, actor: Option<ActorHandle>) -> Result<(), BindError> {
        if actor.is_some() && self.input.is_none() {
            return Err(BindError::MissingInputSource);
        }

        if self.actor.is_some() {
            self.remove_input_bindings();
        }

        self.actor = actor;

        if let Some(handle) = self.actor.clone() {
            self.reset_delta();
            self.setup_input_bindings();
            let mut bound = handle.borrow_mut();
            bound.enable_input();
            self.pose = Pose::new(bound.actor_location(), bound.actor_rotation());
            debug!("bound actor at {:?} facing {:?}", self.pose.position, self.pose.rotation);
        }
        Ok(())
    }

    /// The currently bound actor, if any.
    #[must_use]
    pub const fn actor(&self) -> Option<&ActorHandle> {
        self.actor.as_ref()
    }

    /// Returns `true` while an actor is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.actor.is_some()
    }

    /// Applies one frame of motion to the bound actor.
    ///
    /// Calling this without a bound actor is a caller error: it is logged and
    /// nothing is mutated.
    pub fn update_actor_pose(&mut self, dt: f32) {
        let Some(actor) = self.actor.clone() else {
            error!("update_actor_pose called with no actor bound");
            return;
        };

        self.update_delta_position(dt);
        self.pose.position += self.delta.position;
        self.pose.rotation += self.delta.rotation;
        self.pose.rotation = self
            .pose
            .rotation
            .with_clamped_pitch(self.settings.pitch_limit);

        trace!("applying pose {:?}", self.pose);
        actor
            .borrow_mut()
            .set_actor_location_and_rotation(self.pose.position, self.pose.rotation);
        self.reset_delta();
    }

    /// The delta accumulated since the last applied update.
    #[must_use]
    pub const fn delta_pose(&self) -> Pose {
        self.delta
    }

    /// Zeroes the pending position and rotation delta.
    pub fn reset_delta(&mut self) {
        self.delta = Pose::ZERO;
    }

    /// Integrates the current input into the pending position delta.
    ///
    /// Non-zero input either sets velocity outright (acceleration disabled)
    /// or ramps it by `input * acceleration * dt`. The velocity is rotated
    /// by the actor's current orientation before being scaled by `dt`.
    /// Zero input stops motion at once: velocity and position delta are
    /// cleared.
    pub fn update_delta_position(&mut self, dt: f32) {
        if is_nearly_zero_vec(self.move_input) {
            self.delta.position = Vec3::ZERO;
            self.last_velocity = Vec3::ZERO;
            return;
        }

        if is_nearly_zero(self.settings.acceleration, NEARLY_ZERO) {
            self.last_velocity = self.move_input * self.settings.instant_speed;
        } else {
            self.last_velocity += self.move_input * (self.settings.acceleration * dt);
        }

        let facing = self.actor_facing();
        self.delta.position += facing.rotate_vector(self.last_velocity * dt);
    }

    /// Forward axis handler.
    pub fn input_forward(&mut self, value: f32) {
        self.move_input.x = value;
    }

    /// Right axis handler.
    pub fn input_right(&mut self, value: f32) {
        self.move_input.y = value;
    }

    /// Down axis handler. Stored inverted so positive Z means up.
    pub fn input_down(&mut self, value: f32) {
        self.move_input.z = -value;
    }

    /// Yaw rate handler. Accumulates directly into the rotation delta.
    pub fn input_yaw_rate(&mut self, value: f32) {
        if !is_nearly_zero(value, NEARLY_ZERO) {
            self.delta.rotation.add_angles(0.0, value, 0.0);
        }
    }

    /// Pitch rate handler. Positive input looks down.
    pub fn input_pitch_rate(&mut self, value: f32) {
        if !is_nearly_zero(value, NEARLY_ZERO) {
            self.delta.rotation.add_angles(-value, 0.0, 0.0);
        }
    }

    /// The integrated pose last written to the actor.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        self.pose
    }

    /// Velocity carried across frames, in actor-local space.
    #[must_use]
    pub const fn last_velocity(&self) -> Vec3 {
        self.last_velocity
    }

    /// Latest forward/right/up input values.
    #[must_use]
    pub const fn move_input(&self) -> Vec3 {
        self.move_input
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Replaces the settings. Takes effect on the next update.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] and keeps the current settings when
    /// `settings` fail validation.
    pub fn set_settings(&mut self, settings: ControllerSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    fn actor_facing(&self) -> Rotator {
        self.actor
            .as_ref()
            .map_or(self.pose.rotation, |actor| actor.borrow().actor_rotation())
    }

    fn setup_input_bindings(&self) {
        let Some(input) = &self.input else {
            return;
        };
        let mut source = input.borrow_mut();
        for (axis, handler) in AXIS_BINDINGS {
            source.bind_axis(axis, handler);
        }
    }

    // Stale input must not move the next actor, so motion state goes with
    // the bindings.
    fn remove_input_bindings(&mut self) {
        if let Some(input) = &self.input {
            input.borrow_mut().clear_axis_bindings();
        }
        self.move_input = Vec3::ZERO;
        self.last_velocity = Vec3::ZERO;
        debug!("removed axis bindings");
    }
}
