//! Binding lifecycle tests using mocked host collaborators.
//!
//! The mocks check the exact calls the controller makes on the host input
//! facility and actor: subscriptions per axis, unsubscription before a new
//! actor is bound, and no transform writes without an actor.
use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use manual_pose::{
    ActorHandle, Axis, AxisHandler, InputHandle, InputSource, ManualPoseController, PoseActor,
    Rotator,
};
use mockall::mock;

mock! {
    pub Input {}
    impl InputSource for Input {
        fn bind_axis(&mut self, axis: Axis, handler: AxisHandler);
        fn clear_axis_bindings(&mut self);
    }
}

mock! {
    pub Actor {}
    impl PoseActor for Actor {
        fn actor_location(&self) -> Vec3;
        fn actor_rotation(&self) -> Rotator;
        fn set_actor_location_and_rotation(&mut self, location: Vec3, rotation: Rotator);
        fn enable_input(&mut self);
    }
}

fn placed_actor(location: Vec3, rotation: Rotator) -> MockActor {
    let mut actor = MockActor::new();
    actor.expect_enable_input().times(1).return_const(());
    actor.expect_actor_location().return_const(location);
    actor.expect_actor_rotation().return_const(rotation);
    actor
}

fn handle<T: PoseActor + 'static>(actor: T) -> ActorHandle {
    Rc::new(RefCell::new(actor))
}

fn input_handle(input: MockInput) -> InputHandle {
    Rc::new(RefCell::new(input))
}

#[test]
fn binding_subscribes_each_axis_once() {
    let mut input = MockInput::new();
    for axis in Axis::ALL {
        input
            .expect_bind_axis()
            .withf(move |bound, _| *bound == axis)
            .times(1)
            .return_const(());
    }
    input.expect_clear_axis_bindings().never();

    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(input_handle(input));
    controller
        .set_actor(Some(handle(placed_actor(Vec3::ZERO, Rotator::ZERO))))
        .expect("bind");
    assert!(controller.is_bound());
}

/// Input source that records every call in order.
#[derive(Default)]
struct CallLog {
    calls: Vec<String>,
}

impl InputSource for CallLog {
    fn bind_axis(&mut self, axis: Axis, _handler: AxisHandler) {
        self.calls.push(format!("bind {axis}"));
    }

    fn clear_axis_bindings(&mut self) {
        self.calls.push("clear".to_owned());
    }
}

#[test]
fn rebinding_unsubscribes_before_subscribing() {
    let log = Rc::new(RefCell::new(CallLog::default()));
    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(log.clone());
    controller
        .set_actor(Some(handle(placed_actor(Vec3::ZERO, Rotator::ZERO))))
        .expect("first bind");
    controller
        .set_actor(Some(handle(placed_actor(Vec3::X, Rotator::ZERO))))
        .expect("second bind");

    let binds: Vec<String> = Axis::ALL.iter().map(|axis| format!("bind {axis}")).collect();
    let mut expected = binds.clone();
    expected.push("clear".to_owned());
    expected.extend(binds);
    assert_eq!(log.borrow().calls, expected);
    assert_eq!(controller.pose().position, Vec3::X);
}

#[test]
fn clearing_the_actor_only_unsubscribes() {
    let mut input = MockInput::new();
    input.expect_bind_axis().times(5).return_const(());
    input.expect_clear_axis_bindings().times(1).return_const(());

    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(input_handle(input));
    controller
        .set_actor(Some(handle(placed_actor(Vec3::ZERO, Rotator::ZERO))))
        .expect("bind");
    controller.set_actor(None).expect("unbind");
    assert!(controller.actor().is_none());
}

#[test]
fn unbound_controller_never_touches_input() {
    let mut input = MockInput::new();
    input.expect_bind_axis().never();
    input.expect_clear_axis_bindings().never();

    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(input_handle(input));
    controller.set_actor(None).expect("no-op unbind");
    controller.update_actor_pose(0.1);
    assert!(controller.delta_pose().is_zero());
}

#[test]
fn update_writes_integrated_pose_to_actor() {
    let mut input = MockInput::new();
    input.expect_bind_axis().return_const(());

    let start = Vec3::new(10.0, 0.0, 5.0);
    let mut actor = placed_actor(start, Rotator::ZERO);
    actor
        .expect_set_actor_location_and_rotation()
        .withf(|location, rotation| {
            (*location - Vec3::new(60.0, 0.0, 5.0)).length() < 1e-3
                && *rotation == Rotator::new(0.0, 5.0, 0.0)
        })
        .times(1)
        .return_const(());

    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(input_handle(input));
    controller.set_actor(Some(handle(actor))).expect("bind");

    controller.input_forward(1.0);
    controller.input_yaw_rate(5.0);
    controller.update_actor_pose(0.05);
}

#[test]
fn actor_handle_is_returned_unchanged() {
    let mut input = MockInput::new();
    input.expect_bind_axis().return_const(());

    let actor = handle(placed_actor(Vec3::ZERO, Rotator::ZERO));
    let mut controller = ManualPoseController::default();
    controller.initialize_for_play(input_handle(input));
    controller.set_actor(Some(actor.clone())).expect("bind");

    let bound = controller.actor().expect("actor bound");
    assert!(Rc::ptr_eq(bound, &actor));
}
