//! Tolerance-based float comparisons used across the controller.
//!
//! Axis input arrives from analogue devices and keyboard mappings, so exact
//! comparisons against zero are avoided throughout.

use glam::Vec3;

use crate::NEARLY_ZERO;

/// Returns `true` when `value` lies within `tolerance` of zero.
///
/// # Examples
/// ```
/// use manual_pose::numeric::is_nearly_zero;
/// assert!(is_nearly_zero(1e-9, 1e-8));
/// assert!(!is_nearly_zero(0.5, 1e-8));
/// ```
#[must_use]
pub fn is_nearly_zero(value: f32, tolerance: f32) -> bool {
    value.abs() <= tolerance
}

/// Returns `true` when the squared length of `vector` is nearly zero.
///
/// Uses [`NEARLY_ZERO`] as the tolerance. Non-finite vectors are never
/// considered zero.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use manual_pose::numeric::is_nearly_zero_vec;
/// assert!(is_nearly_zero_vec(Vec3::ZERO));
/// assert!(!is_nearly_zero_vec(Vec3::X));
/// ```
#[must_use]
pub fn is_nearly_zero_vec(vector: Vec3) -> bool {
    is_nearly_zero(vector.length_squared(), NEARLY_ZERO)
}
