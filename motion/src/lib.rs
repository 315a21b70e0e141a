//! First-person character motion shared by every controller flavour.
//!
//! Everything here is plain data plus per-tick functions. The host app owns
//! scheduling: it calls [`Motor::tick`] once per fixed step and
//! [`LookState::apply_mouse`] once per rendered frame, after the tick.

pub mod config;
pub mod contacts;
pub mod look;
pub mod motor;
pub mod planar;

pub use config::{ConfigError, MotionConfig};
pub use contacts::GroundContacts;
pub use look::{LookState, PITCH_LIMIT_DEGREES};
pub use motor::{blend_factor, BodyState, MotionMode, Motor, TickInput, TickOutcome, INPUT_EPSILON};
pub use planar::{raw_input, target_velocity, wish_direction, MoveKeys, PlanarBasis};

/// Character capsule height in meters.
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Character capsule radius in meters.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Eye height of the camera pivot above the capsule center.
pub const PIVOT_HEIGHT: f32 = PLAYER_HEIGHT * 0.4;
