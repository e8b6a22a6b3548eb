//! Behavioural tests: scripted flights through the manual pose controller.
//!
//! Each scenario builds a flight script, replays it with `manual_pose::replay`
//! and checks the recorded poses.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use glam::Vec3;
use manual_pose::{replay, Axis, AxisFrame, ControllerSettings, FlightScript, Pose, ScriptFrame};
use rspec::block::Context as Scenario;
use rspec_runner::run_scenarios;

/// Fixed frame time for deterministic scenarios.
const DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
struct FlightFixture {
    settings: ControllerSettings,
    script: FlightScript,
    poses: Vec<Pose>,
}

impl FlightFixture {
    fn with_acceleration(acceleration: f32) -> Self {
        Self {
            settings: ControllerSettings {
                acceleration,
                ..ControllerSettings::default()
            },
            ..Self::default()
        }
    }

    /// Appends `count` frames holding `axes`.
    fn hold(&mut self, axes: &[(Axis, f32)], count: usize) {
        let frame = ScriptFrame {
            dt: DT,
            axes: axes.iter().copied().collect::<AxisFrame>(),
        };
        self.script
            .frames
            .extend(std::iter::repeat(frame).take(count));
    }

    fn fly(&mut self) {
        self.poses = replay(&self.script, self.settings)
            .unwrap_or_else(|e| panic!("replay failed: {e}"));
    }

    fn last(&self) -> Pose {
        self.poses
            .last()
            .copied()
            .unwrap_or_else(|| panic!("no frames flown"))
    }
}

#[test]
fn instant_flight_behaviour() {
    run_scenarios(&rspec::given(
        "a controller with acceleration disabled",
        FlightFixture::with_acceleration(0.0),
        |scenario: &mut Scenario<FlightFixture>| {
            scenario.when("forward is held for three frames", |ctx| {
                ctx.before_each(|state| {
                    state.script.frames.clear();
                    state.hold(&[(Axis::MoveForward, 1.0)], 3);
                    state.fly();
                });

                ctx.then("each frame advances one hundred units", |state| {
                    for (index, pose) in state.poses.iter().enumerate() {
                        let expected = 100.0 * (index as f32 + 1.0);
                        assert!(
                            (pose.position.x - expected).abs() < 1e-2,
                            "frame {index}: expected x={expected}, got {pose:?}"
                        );
                    }
                });
            });

            scenario.when("forward is released after one frame", |ctx| {
                ctx.before_each(|state| {
                    state.script.frames.clear();
                    state.hold(&[(Axis::MoveForward, 1.0)], 1);
                    state.hold(&[], 2);
                    state.fly();
                });

                ctx.then("the actor stops immediately", |state| {
                    let stopped = state.last();
                    assert!((stopped.position - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-2);
                });
            });

            scenario.when("the operator turns right then flies forward", |ctx| {
                ctx.before_each(|state| {
                    state.script.frames.clear();
                    state.hold(&[(Axis::RotateRight, 90.0)], 1);
                    state.hold(&[(Axis::MoveForward, 1.0)], 1);
                    state.fly();
                });

                ctx.then("motion follows the new heading", |state| {
                    let pose = state.last();
                    assert!((pose.rotation.yaw - 90.0).abs() < 1e-4);
                    assert!(
                        (pose.position - Vec3::new(0.0, 100.0, 0.0)).length() < 1e-2,
                        "expected travel along +Y, got {pose:?}"
                    );
                });
            });

            scenario.when("the operator keeps pitching up", |ctx| {
                ctx.before_each(|state| {
                    state.script.frames.clear();
                    state.hold(&[(Axis::RotateDown, -50.0)], 4);
                    state.fly();
                });

                ctx.then("pitch stops at the limit", |state| {
                    assert!(state.poses.iter().all(|pose| pose.rotation.pitch <= 90.0));
                    assert!((state.last().rotation.pitch - 90.0).abs() < f32::EPSILON);
                });
            });
        },
    ));
}

#[test]
fn ramped_flight_behaviour() {
    run_scenarios(&rspec::given(
        "a controller accelerating at ten units per second squared",
        FlightFixture::with_acceleration(10.0),
        |scenario: &mut Scenario<FlightFixture>| {
            scenario.when("forward is held", |ctx| {
                ctx.before_each(|state| {
                    state.script.frames.clear();
                    state.hold(&[(Axis::MoveForward, 1.0)], 5);
                    state.fly();
                });

                ctx.then("each step covers more ground than the last", |state| {
                    let mut previous_x = 0.0;
                    let mut previous_step = 0.0;
                    for pose in &state.poses {
                        let step = pose.position.x - previous_x;
                        assert!(
                            step > previous_step,
                            "step {step} did not exceed {previous_step}"
                        );
                        previous_x = pose.position.x;
                        previous_step = step;
                    }
                });
            });
        },
    ));
}
