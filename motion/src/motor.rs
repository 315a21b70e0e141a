//! Character motor: one fixed tick of planar movement and jumping.
//!
//! Both controller flavours share input math and blending and differ only in
//! how the result is integrated:
//! - Kinematic: the motor owns velocity and the host moves the transform by
//!   the returned displacement.
//! - Rigid body: the motor reads the body's velocity, steers the planar part
//!   and hands the new velocity back to the physics engine, which keeps
//!   ownership of gravity and collisions.

use bevy::prelude::*;

use crate::config::MotionConfig;
use crate::planar::{target_velocity, wish_direction, MoveKeys, PlanarBasis};

/// Input shorter than this counts as "no input".
pub const INPUT_EPSILON: f32 = 1.0e-5;

/// Fraction of the remaining gap closed in `dt` seconds at `rate` per second.
///
/// Continuous-time exponential approach, so the trajectory does not depend
/// on the tick rate. Non-positive rates or durations close nothing.
pub fn blend_factor(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// How a motor turns velocity into motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionMode {
    /// Velocity is integrated straight into the position.
    #[default]
    Kinematic,
    /// Velocity is written to a simulated body.
    RigidBody,
}

/// Everything sampled from the host for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub keys: MoveKeys,
    pub basis: PlanarBasis,
}

/// Physics feedback for rigid-body motors. Ignored by kinematic motors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    /// The body's current linear velocity as simulated.
    pub velocity: Vec3,
    pub grounded: bool,
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Velocity to keep (kinematic) or write back to the body (rigid body).
    pub velocity: Vec3,
    /// Position change for this tick. Always zero for rigid bodies.
    pub displacement: Vec3,
    pub jumped: bool,
}

/// Per-controller motion state.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Motor {
    pub mode: MotionMode,
    pub velocity: Vec3,
    jump_requested: bool,
}

impl Motor {
    pub fn new(mode: MotionMode) -> Self {
        Self {
            mode,
            ..default()
        }
    }

    /// Latch a jump for the next tick. Called from the frame phase so a key
    /// press between ticks is not missed.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Advance the motor by one tick of `dt` seconds.
    ///
    /// The jump latch is cleared on every tick, whether or not the jump was
    /// performed.
    pub fn tick(
        &mut self,
        config: &MotionConfig,
        input: &TickInput,
        body: BodyState,
        dt: f32,
    ) -> TickOutcome {
        let wish = wish_direction(input.keys, &input.basis);
        let target = target_velocity(wish, config.movement_speed);
        let jump = std::mem::take(&mut self.jump_requested);

        let outcome = match self.mode {
            MotionMode::Kinematic => step_kinematic(config, self.velocity, wish, target, dt),
            MotionMode::RigidBody => step_rigid_body(config, body, wish, target, jump, dt),
        };

        self.velocity = outcome.velocity;
        outcome
    }
}

fn step_kinematic(
    config: &MotionConfig,
    velocity: Vec3,
    wish: Vec3,
    target: Vec3,
    dt: f32,
) -> TickOutcome {
    let rate = if wish.length() < INPUT_EPSILON {
        config.deceleration
    } else {
        config.acceleration
    };

    let velocity = velocity.lerp(target, blend_factor(rate, dt));

    TickOutcome {
        velocity,
        displacement: velocity * dt,
        jumped: false,
    }
}

fn step_rigid_body(
    config: &MotionConfig,
    body: BodyState,
    wish: Vec3,
    target: Vec3,
    jump: bool,
    dt: f32,
) -> TickOutcome {
    let mut velocity = body.velocity;

    // No steering in the air and no braking without input: friction and
    // gravity belong to the physics engine.
    if wish.length() > INPUT_EPSILON && body.grounded {
        let steered = velocity.lerp(target, blend_factor(config.acceleration, dt));
        velocity.x = steered.x;
        velocity.z = steered.z;
    }

    velocity.y = body.velocity.y;

    // No jump buffering: an airborne request is dropped.
    let jumped = jump && body.grounded;
    if jumped {
        velocity.y = config.jump_velocity;
    } else if jump {
        debug!("Jump requested while airborne; dropped");
    }

    TickOutcome {
        velocity,
        displacement: Vec3::ZERO,
        jumped,
    }
}
