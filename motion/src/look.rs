//! Mouse look: accumulated yaw/pitch and the resulting pivot orientation.

use bevy::prelude::*;

/// Pitch is kept inside `[-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES]` so the
/// view never flips over the poles.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Accumulated camera angles in degrees.
///
/// Positive yaw turns right, positive pitch looks down. Yaw is unbounded and
/// wraps only through the trig in [`LookState::orientation`].
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LookState {
    pub yaw: f32,
    pitch: f32,
}

impl LookState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        let mut look = Self::default();
        look.set(yaw, pitch);
        look
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Overwrite both angles. Takes effect on the next [`Self::orientation`].
    pub fn set(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Accumulate one frame of mouse movement.
    ///
    /// `delta.y` is positive when the mouse moved up. With `invert_y` set that
    /// lowers the pitch (looks up); otherwise it raises it.
    pub fn apply_mouse(&mut self, delta: Vec2, sensitivity: f32, invert_y: bool) {
        self.yaw += delta.x * sensitivity;

        if invert_y {
            self.pitch -= delta.y * sensitivity;
        } else {
            self.pitch += delta.y * sensitivity;
        }

        self.pitch = self.pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Pivot rotation from (pitch, yaw, roll = 0) alone.
    ///
    /// Bevy is right-handed with -Z forward, so both angles are negated to
    /// keep "positive yaw turns right, positive pitch looks down".
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_pitch_stays_clamped() {
        let mut look = LookState::default();
        let deltas = [500.0, -30.0, 12.5, -4000.0, 88.0, 1.0, 179.0, -0.5, 1e6];

        for dy in deltas {
            look.apply_mouse(Vec2::new(3.0, dy), 1.0, true);
            assert!(look.pitch() >= -PITCH_LIMIT_DEGREES && look.pitch() <= PITCH_LIMIT_DEGREES);
            look.apply_mouse(Vec2::new(-1.0, dy), 0.7, false);
            assert!(look.pitch() >= -PITCH_LIMIT_DEGREES && look.pitch() <= PITCH_LIMIT_DEGREES);
        }
    }

    #[test]
    fn test_invert_y_direction() {
        let mut inverted = LookState::default();
        inverted.apply_mouse(Vec2::new(0.0, 2.0), 1.0, true);
        assert!(inverted.pitch() < 0.0);

        let mut normal = LookState::default();
        normal.apply_mouse(Vec2::new(0.0, 2.0), 1.0, false);
        assert!(normal.pitch() > 0.0);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut look = LookState::default();
        for _ in 0..10 {
            look.apply_mouse(Vec2::new(90.0, 0.0), 1.0, true);
        }
        assert!((look.yaw - 900.0).abs() < EPS);

        let wrapped = LookState::new(180.0, 0.0).orientation() * Vec3::NEG_Z;
        assert!((look.orientation() * Vec3::NEG_Z).distance(wrapped) < 1e-3);
    }

    #[test]
    fn test_orientation_conventions() {
        let right = LookState::new(90.0, 0.0).orientation() * Vec3::NEG_Z;
        assert!(right.distance(Vec3::X) < EPS);

        let down = LookState::new(0.0, 45.0).orientation() * Vec3::NEG_Z;
        assert!(down.y < 0.0);
        assert!(down.x.abs() < EPS);
    }

    #[test]
    fn test_orientation_has_no_roll() {
        let look = LookState::new(37.0, -61.0);
        let right = look.orientation() * Vec3::X;
        assert!(right.y.abs() < EPS);
    }

    #[test]
    fn test_set_overwrites_and_clamps() {
        let mut look = LookState::default();
        look.apply_mouse(Vec2::new(25.0, 25.0), 1.0, false);
        look.set(0.0, 120.0);

        assert_eq!(look.yaw, 0.0);
        assert_eq!(look.pitch(), PITCH_LIMIT_DEGREES);
        let expected = LookState::new(0.0, 89.0).orientation() * Vec3::NEG_Z;
        assert!((look.orientation() * Vec3::NEG_Z).distance(expected) < EPS);
    }
}
