//! Controller tunables.
//!
//! Set once when a controller is spawned and never written by the motion code.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement and look tuning for one controller.
#[derive(Component, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Top planar speed in m/s.
    pub movement_speed: f32,
    /// Blend rate (1/s) toward the target velocity while there is input.
    pub acceleration: f32,
    /// Blend rate (1/s) toward rest while there is no input.
    pub deceleration: f32,
    /// Upward velocity in m/s applied on a grounded jump (rigid body only).
    pub jump_velocity: f32,
    /// Degrees of rotation per mouse axis unit.
    pub mouse_sensitivity: f32,
    /// When set, moving the mouse up looks up.
    pub invert_y: bool,
}

impl MotionConfig {
    pub const DEFAULT_MOVEMENT_SPEED: f32 = 5.0;
    pub const DEFAULT_ACCELERATION: f32 = 4.0;
    pub const DEFAULT_DECELERATION: f32 = 2.0;
    pub const DEFAULT_JUMP_VELOCITY: f32 = 5.0;
    pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 1.0;

    /// Parse a RON document and validate the result.
    ///
    /// Fields left out of the document keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = ron::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the motor cannot work with.
    ///
    /// Every numeric tunable must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("movement_speed", self.movement_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("jump_velocity", self.jump_velocity),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            movement_speed: Self::DEFAULT_MOVEMENT_SPEED,
            acceleration: Self::DEFAULT_ACCELERATION,
            deceleration: Self::DEFAULT_DECELERATION,
            jump_velocity: Self::DEFAULT_JUMP_VELOCITY,
            mouse_sensitivity: Self::DEFAULT_MOUSE_SENSITIVITY,
            invert_y: true,
        }
    }
}

/// Why a configuration document was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid RON for [`MotionConfig`].
    Parse(ron::error::SpannedError),
    /// A field holds a negative or non-finite value.
    Invalid { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse motion config: {e}"),
            ConfigError::Invalid { field, value } => {
                write!(f, "motion config field `{field}` must be finite and >= 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}
