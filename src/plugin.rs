//! Bevy host integration.
//!
//! `ManualPosePlugin` lets an operator fly whichever entity carries the
//! [`ManualPoseTarget`] marker. Keyboard state is mapped onto the five
//! controller axes through [`AxisKeyMap`], routed through an [`AxisRouter`]
//! and integrated once per frame. The controller drives an in-memory
//! [`TransformActor`] proxy whose pose is copied into the entity's
//! `Transform` (translation = position, rotation = rotator quaternion).
//!
//! The controller shares state through `Rc`, so the rig is a non-send
//! resource and its systems run on the main thread.

use std::cell::RefCell;
use std::rc::Rc;

use bevy::prelude::*;
use log::{debug, warn};

use crate::actor::TransformActor;
use crate::controller::ManualPoseController;
use crate::input::{Axis, AxisFrame, AxisRouter};
use crate::pose::{Pose, Rotator};
use crate::settings::ControllerSettings;

/// Marker for the entity flown by the manual pose controller.
///
/// Only one entity is flown at a time. When several gain the marker in the
/// same frame the last one queried wins.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualPoseTarget;

/// One key contributing to an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyAxis {
    /// Key that must be held.
    pub key: KeyCode,
    /// Axis receiving the contribution.
    pub axis: Axis,
    /// Value added while the key is held.
    pub scale: f32,
}

impl KeyAxis {
    /// Creates a key contribution.
    #[must_use]
    pub const fn new(key: KeyCode, axis: Axis, scale: f32) -> Self {
        Self { key, axis, scale }
    }
}

/// Keyboard layout used to sample axis values.
///
/// The default flies with WASD, Q/E for down/up and the arrow keys for yaw
/// and pitch.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AxisKeyMap {
    /// Contributions summed per axis each frame.
    pub bindings: Vec<KeyAxis>,
}

impl Default for AxisKeyMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                KeyAxis::new(KeyCode::KeyW, Axis::MoveForward, 1.0),
                KeyAxis::new(KeyCode::KeyS, Axis::MoveForward, -1.0),
                KeyAxis::new(KeyCode::KeyD, Axis::MoveRight, 1.0),
                KeyAxis::new(KeyCode::KeyA, Axis::MoveRight, -1.0),
                KeyAxis::new(KeyCode::KeyQ, Axis::MoveDown, 1.0),
                KeyAxis::new(KeyCode::KeyE, Axis::MoveDown, -1.0),
                KeyAxis::new(KeyCode::ArrowRight, Axis::RotateRight, 1.0),
                KeyAxis::new(KeyCode::ArrowLeft, Axis::RotateRight, -1.0),
                KeyAxis::new(KeyCode::ArrowDown, Axis::RotateDown, 1.0),
                KeyAxis::new(KeyCode::ArrowUp, Axis::RotateDown, -1.0),
            ],
        }
    }
}

/// Samples held keys into one frame of axis values.
///
/// Contributions to the same axis are summed and clamped to `[-1, 1]`, so
/// opposing keys cancel.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use manual_pose::input::Axis;
/// use manual_pose::plugin::{sample_axes, AxisKeyMap};
///
/// let mut keyboard = ButtonInput::<KeyCode>::default();
/// keyboard.press(KeyCode::KeyW);
/// let frame = sample_axes(&keyboard, &AxisKeyMap::default());
/// assert_eq!(frame.get(&Axis::MoveForward), Some(&1.0));
/// ```
#[must_use]
pub fn sample_axes(keyboard: &ButtonInput<KeyCode>, key_map: &AxisKeyMap) -> AxisFrame {
    let mut frame = AxisFrame::new();
    for binding in key_map
        .bindings
        .iter()
        .filter(|binding| keyboard.pressed(binding.key))
    {
        *frame.entry(binding.axis).or_default() += binding.scale;
    }
    for value in frame.values_mut() {
        *value = value.clamp(-1.0, 1.0);
    }
    frame
}

/// Reads the pose carried by a `Transform`.
#[must_use]
pub fn pose_from_transform(transform: &Transform) -> Pose {
    Pose::new(transform.translation, Rotator::from_quat(transform.rotation))
}

/// Applies `pose` to `base`, keeping its scale.
#[must_use]
pub fn transform_from_pose(pose: Pose, base: &Transform) -> Transform {
    Transform {
        translation: pose.position,
        rotation: pose.rotation.to_quat(),
        scale: base.scale,
    }
}

/// Controller, router and proxy actor shared by the plugin systems.
pub struct ManualPoseRig {
    controller: ManualPoseController,
    router: Rc<RefCell<AxisRouter>>,
    proxy: Rc<RefCell<TransformActor>>,
    target: Option<Entity>,
}

impl ManualPoseRig {
    /// Creates an unbound rig whose controller is ready for play.
    ///
    /// Settings that fail validation are reported and replaced by the
    /// defaults.
    #[must_use]
    pub fn new(settings: ControllerSettings) -> Self {
        let router = AxisRouter::shared();
        let mut controller = ManualPoseController::new(settings).unwrap_or_else(|e| {
            warn!("rejected manual pose settings, using defaults: {e}");
            ManualPoseController::default()
        });
        controller.initialize_for_play(router.clone());
        Self {
            controller,
            router,
            proxy: TransformActor::default().shared(),
            target: None,
        }
    }

    /// Entity currently flown, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Entity> {
        self.target
    }

    /// The underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &ManualPoseController {
        &self.controller
    }

    fn bind(&mut self, entity: Entity, transform: &Transform) {
        self.proxy.borrow_mut().pose = pose_from_transform(transform);
        match self.controller.set_actor(Some(self.proxy.clone())) {
            Ok(()) => {
                debug!("flying {entity:?}");
                self.target = Some(entity);
            }
            Err(e) => warn!("cannot fly {entity:?}: {e}"),
        }
    }

    fn unbind(&mut self) {
        if let Err(e) = self.controller.set_actor(None) {
            warn!("unbinding manual pose target failed: {e}");
        }
        debug!("stopped flying {:?}", self.target);
        self.target = None;
    }

    fn drive(&mut self, frame: &AxisFrame, dt: f32) -> Pose {
        self.router.borrow().dispatch_frame(&mut self.controller, frame);
        self.controller.update_actor_pose(dt);
        self.proxy.borrow().pose
    }
}

/// Binds newly marked entities and unbinds removed ones.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn bind_manual_pose_targets(
    mut rig: NonSendMut<ManualPoseRig>,
    added: Query<(Entity, &Transform), Added<ManualPoseTarget>>,
    mut removed: RemovedComponents<ManualPoseTarget>,
) {
    for entity in removed.read() {
        if rig.target == Some(entity) {
            rig.unbind();
        }
    }
    for (entity, transform) in &added {
        rig.bind(entity, transform);
    }
}

/// Samples the keyboard, integrates one frame and writes the target's
/// `Transform`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn drive_manual_pose(
    mut rig: NonSendMut<ManualPoseRig>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    key_map: Res<AxisKeyMap>,
    time: Res<Time>,
    mut targets: Query<&mut Transform, With<ManualPoseTarget>>,
) {
    let Some(entity) = rig.target else {
        return;
    };
    let Ok(mut transform) = targets.get_mut(entity) else {
        return;
    };

    let frame = keyboard
        .map(|keys| sample_axes(&keys, &key_map))
        .unwrap_or_default();
    let pose = rig.drive(&frame, time.delta_secs());
    let updated = transform_from_pose(pose, &transform);
    *transform = updated;
}

/// Plugin wiring the manual pose controller into a Bevy app.
///
/// # Examples
///
/// ```no_run
/// use bevy::prelude::*;
/// use manual_pose::plugin::{ManualPosePlugin, ManualPoseTarget};
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins)
///     .add_plugins(ManualPosePlugin::default());
/// app.world_mut().spawn((Transform::default(), ManualPoseTarget));
/// app.update();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualPosePlugin {
    /// Settings handed to the controller.
    pub settings: ControllerSettings,
}

impl Plugin for ManualPosePlugin {
    fn build(&self, app: &mut App) {
        app.insert_non_send_resource(ManualPoseRig::new(self.settings));
        app.init_resource::<AxisKeyMap>();
        app.add_systems(
            Update,
            (bind_manual_pose_targets, drive_manual_pose).chain(),
        );
    }
}
