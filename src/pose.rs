//! Pose value types.
//!
//! Positions live in host world units. Rotations are stored as pitch, yaw and
//! roll in degrees using the host convention: Z is up, X is forward and Y is
//! right. Positive yaw turns X toward Y, positive pitch lifts X toward +Z and
//! positive roll drops Y toward -Z.

use std::ops::{Add, AddAssign};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation expressed as three angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotator {
    /// Rotation about the right axis. Positive looks up.
    pub pitch: f32,
    /// Rotation about the up axis. Positive turns right.
    pub yaw: f32,
    /// Rotation about the forward axis.
    pub roll: f32,
}

impl Rotator {
    /// The identity rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a rotator from pitch, yaw and roll in degrees.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Adds the given angles component-wise.
    pub fn add_angles(&mut self, delta_pitch: f32, delta_yaw: f32, delta_roll: f32) {
        self.pitch += delta_pitch;
        self.yaw += delta_yaw;
        self.roll += delta_roll;
    }

    /// Returns a copy with pitch clamped to `[-limit, limit]`.
    ///
    /// # Examples
    /// ```
    /// use manual_pose::pose::Rotator;
    /// let clamped = Rotator::new(120.0, 10.0, 0.0).with_clamped_pitch(90.0);
    /// assert_eq!(clamped, Rotator::new(90.0, 10.0, 0.0));
    /// ```
    #[must_use]
    pub fn with_clamped_pitch(self, limit: f32) -> Self {
        Self {
            pitch: self.pitch.max(-limit).min(limit),
            ..self
        }
    }

    /// Converts the rotation into a quaternion in the host frame.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            -self.roll.to_radians(),
        )
    }

    /// Recovers pitch, yaw and roll from a quaternion produced by
    /// [`Rotator::to_quat`].
    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, neg_pitch, neg_roll) = rotation.to_euler(EulerRot::ZYX);
        Self::new(
            -neg_pitch.to_degrees(),
            yaw.to_degrees(),
            -neg_roll.to_degrees(),
        )
    }

    /// Rotates `vector` from actor-local space into world space.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use manual_pose::pose::Rotator;
    /// let turned = Rotator::new(0.0, 90.0, 0.0).rotate_vector(Vec3::X);
    /// assert!((turned - Vec3::Y).length() < 1e-5);
    /// ```
    #[must_use]
    pub fn rotate_vector(self, vector: Vec3) -> Vec3 {
        self.to_quat() * vector
    }

    /// Returns `true` when every angle is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl Add for Rotator {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.pitch + other.pitch,
            self.yaw + other.yaw,
            self.roll + other.roll,
        )
    }
}

impl AddAssign for Rotator {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Placement of an actor: a world position plus an orientation.
///
/// The same shape carries the per-frame delta accumulated by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Rotator,
}

impl Pose {
    /// Zero position with identity rotation.
    pub const ZERO: Self = Self::new(Vec3::ZERO, Rotator::ZERO);

    /// Creates a pose from its parts.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Rotator) -> Self {
        Self { position, rotation }
    }

    /// Returns `true` when both position and rotation are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation.is_zero()
    }
}
