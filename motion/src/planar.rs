//! Camera-relative planar movement input.

use bevy::prelude::*;

/// Directional keys held during the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Horizontal right/forward axes of the camera pivot.
///
/// Both vectors have a zero Y component and are unit length, or zero when
/// the source axis was vertical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBasis {
    pub right: Vec3,
    pub forward: Vec3,
}

impl PlanarBasis {
    /// Basis from a pivot orientation. In Bevy +X is right and -Z is forward.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::flatten(rotation * Vec3::X, rotation * Vec3::NEG_Z)
    }

    /// Drop the vertical component of both axes and re-normalize.
    pub fn flatten(right: Vec3, forward: Vec3) -> Self {
        Self {
            right: Vec3::new(right.x, 0.0, right.z).normalize_or_zero(),
            forward: Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero(),
        }
    }
}

impl Default for PlanarBasis {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            forward: Vec3::NEG_Z,
        }
    }
}

/// Signed sum of the basis vectors for every held key.
pub fn raw_input(keys: MoveKeys, basis: &PlanarBasis) -> Vec3 {
    let mut input = Vec3::ZERO;

    if keys.right {
        input += basis.right;
    }
    if keys.left {
        input -= basis.right;
    }
    if keys.forward {
        input += basis.forward;
    }
    if keys.backward {
        input -= basis.forward;
    }

    input
}

/// Input direction with diagonals scaled back to unit length.
///
/// Shorter vectors are left alone, so the result has length in `[0, 1]`.
pub fn wish_direction(keys: MoveKeys, basis: &PlanarBasis) -> Vec3 {
    let input = raw_input(keys, basis);
    if input.length() > 1.0 {
        input.normalize_or_zero()
    } else {
        input
    }
}

pub fn target_velocity(wish: Vec3, movement_speed: f32) -> Vec3 {
    wish * movement_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn all_key_sets() -> impl Iterator<Item = MoveKeys> {
        (0u8..16).map(|bits| MoveKeys {
            forward: bits & 1 != 0,
            backward: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
        })
    }

    fn unity_basis() -> PlanarBasis {
        PlanarBasis::flatten(Vec3::X, Vec3::Z)
    }

    #[test]
    fn test_raw_input_is_signed_sum() {
        let basis = PlanarBasis::from_rotation(Quat::from_rotation_y(0.7));

        for keys in all_key_sets() {
            let mut expected = Vec3::ZERO;
            if keys.forward {
                expected += basis.forward;
            }
            if keys.backward {
                expected -= basis.forward;
            }
            if keys.left {
                expected -= basis.right;
            }
            if keys.right {
                expected += basis.right;
            }
            assert!(raw_input(keys, &basis).distance(expected) < EPS, "{keys:?}");
        }
    }

    #[test]
    fn test_wish_direction_never_exceeds_unit_length() {
        let basis = PlanarBasis::from_rotation(Quat::from_euler(EulerRot::YXZ, 1.3, -0.4, 0.0));

        for keys in all_key_sets() {
            assert!(wish_direction(keys, &basis).length() <= 1.0 + EPS, "{keys:?}");
        }
    }

    #[test]
    fn test_diagonal_speed_matches_straight_speed() {
        let basis = unity_basis();
        let straight = MoveKeys {
            forward: true,
            ..default()
        };
        let diagonal = MoveKeys {
            forward: true,
            right: true,
            ..default()
        };

        let straight_speed = target_velocity(wish_direction(straight, &basis), 5.0).length();
        let diagonal_speed = target_velocity(wish_direction(diagonal, &basis), 5.0).length();
        assert!((straight_speed - diagonal_speed).abs() < EPS);
    }

    #[test]
    fn test_forward_right_example() {
        let basis = unity_basis();
        let keys = MoveKeys {
            forward: true,
            right: true,
            ..default()
        };

        let raw = raw_input(keys, &basis);
        assert!(raw.distance(Vec3::new(1.0, 0.0, 1.0)) < EPS);
        assert!((raw.length() - 2.0_f32.sqrt()).abs() < EPS);

        let wish = wish_direction(keys, &basis);
        assert!(wish.distance(Vec3::new(0.7071, 0.0, 0.7071)) < EPS);

        let target = target_velocity(wish, 5.0);
        assert!(target.distance(Vec3::new(3.5355, 0.0, 3.5355)) < EPS);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keys = MoveKeys {
            forward: true,
            backward: true,
            left: true,
            right: true,
        };
        assert_eq!(wish_direction(keys, &unity_basis()), Vec3::ZERO);
    }

    #[test]
    fn test_flatten_strips_pitch() {
        // Looking 60 degrees down still walks along the ground at full speed.
        let basis = PlanarBasis::from_rotation(Quat::from_euler(EulerRot::YXZ, 0.0, -1.05, 0.0));
        assert!(basis.forward.y.abs() < EPS);
        assert!((basis.forward.length() - 1.0).abs() < EPS);
        assert!(basis.forward.distance(Vec3::NEG_Z) < EPS);
    }

    #[test]
    fn test_flatten_vertical_axis_is_zero() {
        let basis = PlanarBasis::flatten(Vec3::X, Vec3::Y);
        assert_eq!(basis.forward, Vec3::ZERO);
        assert!(basis.forward.is_finite());
    }
}
