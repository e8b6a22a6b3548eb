//! Axis input routing.
//!
//! Hosts deliver one scalar per named axis per frame. The controller
//! registers a handler for each of the five axes it understands through an
//! [`InputSource`] and removes them all again when its actor is unbound.
//! [`AxisRouter`] is the in-crate routing table used by the Bevy integration
//! and by scripted replays.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::controller::ManualPoseController;
use crate::error::UnknownAxis;

/// Named control axes the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// Forward motion along the actor's X axis.
    MoveForward,
    /// Downward motion. Inverted into the controller's up-positive Z.
    MoveDown,
    /// Sideways motion along the actor's Y axis.
    MoveRight,
    /// Yaw rate in degrees per input event.
    RotateRight,
    /// Pitch rate in degrees per input event. Positive looks down.
    RotateDown,
}

impl Axis {
    /// Every axis in binding order.
    pub const ALL: [Self; 5] = [
        Self::MoveForward,
        Self::MoveDown,
        Self::MoveRight,
        Self::RotateRight,
        Self::RotateDown,
    ];

    /// Host-facing identifier of the axis.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveForward => "MoveForward",
            Self::MoveDown => "MoveDown",
            Self::MoveRight => "MoveRight",
            Self::RotateRight => "RotateRight",
            Self::RotateDown => "RotateDown",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = UnknownAxis;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.name() == name)
            .ok_or_else(|| UnknownAxis(name.to_owned()))
    }
}

/// Callback invoked with the axis value for the current frame.
pub type AxisHandler = fn(&mut ManualPoseController, f32);

/// Axis values sampled for one frame. Missing axes read as zero.
pub type AxisFrame = BTreeMap<Axis, f32>;

/// Host facility that routes axis values to subscribed handlers.
pub trait InputSource {
    /// Subscribes `handler` to `axis`.
    fn bind_axis(&mut self, axis: Axis, handler: AxisHandler);

    /// Removes every axis subscription.
    fn clear_axis_bindings(&mut self);
}

/// Shared handle to the host's input facility.
pub type InputHandle = Rc<RefCell<dyn InputSource>>;

/// Ordered table of axis subscriptions.
///
/// Dispatch visits bindings in registration order, so an axis bound twice is
/// delivered twice.
#[derive(Debug, Clone, Default)]
pub struct AxisRouter {
    bindings: Vec<(Axis, AxisHandler)>,
}

impl AxisRouter {
    /// Creates an empty router.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Wraps a new router in a shared cell.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` when at least one handler listens to `axis`.
    #[must_use]
    pub fn is_bound(&self, axis: Axis) -> bool {
        self.bindings.iter().any(|(bound, _)| *bound == axis)
    }

    /// Delivers `value` to every handler bound to `axis`.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, controller: &mut ManualPoseController, axis: Axis, value: f32) -> usize {
        let mut delivered = 0;
        for &(bound, handler) in &self.bindings {
            if bound != axis {
                continue;
            }
            handler(controller, value);
            delivered += 1;
        }
        delivered
    }

    /// Delivers one frame of axis values.
    ///
    /// Every binding is invoked exactly once, with zero for axes absent from
    /// `frame`, matching hosts that poll all bound axes each tick.
    pub fn dispatch_frame(&self, controller: &mut ManualPoseController, frame: &AxisFrame) {
        for &(axis, handler) in &self.bindings {
            let value = frame.get(&axis).copied().unwrap_or_default();
            trace!("{axis} = {value}");
            handler(controller, value);
        }
    }
}

impl InputSource for AxisRouter {
    fn bind_axis(&mut self, axis: Axis, handler: AxisHandler) {
        self.bindings.push((axis, handler));
    }

    fn clear_axis_bindings(&mut self) {
        self.bindings.clear();
    }
}
