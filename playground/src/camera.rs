//! First-person camera: mouse look applied to each controller's pivot.

use bevy::prelude::*;
use motion::{LookState, MotionConfig};

use crate::input::MouseLook;
use crate::player::{CameraPivot, PivotLink, Possessed};

/// Accumulate mouse look on the possessed controller and write every pivot's
/// rotation from its look angles.
///
/// The rotation is rebuilt from yaw/pitch each frame rather than composed
/// with the previous one, so edits to [`LookState`] show up immediately.
pub fn update_camera(
    mouse: Res<MouseLook>,
    mut bodies: Query<(&mut LookState, &MotionConfig, &PivotLink, Has<Possessed>)>,
    mut pivots: Query<&mut Transform, With<CameraPivot>>,
) {
    for (mut look, config, pivot, possessed) in bodies.iter_mut() {
        if possessed && mouse.delta != Vec2::ZERO {
            look.apply_mouse(mouse.delta, config.mouse_sensitivity, config.invert_y);
        }

        if let Ok(mut pivot_transform) = pivots.get_mut(pivot.0) {
            pivot_transform.rotation = look.orientation();
        }
    }
}
