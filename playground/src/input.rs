//! Keyboard, mouse and cursor handling.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use motion::{MoveKeys, Motor};

use crate::player::Possessed;

/// Mouse axis units per pixel of pointer motion.
pub const MOUSE_AXIS_PER_PIXEL: f32 = 0.1;

/// Mouse movement gathered this frame, in axis units with +Y meaning "up".
#[derive(Resource, Default, Debug)]
pub struct MouseLook {
    pub delta: Vec2,
}

/// Convert a window-space pixel delta (+Y down) to mouse axis units (+Y up).
pub fn mouse_axis(pixels: Vec2) -> Vec2 {
    Vec2::new(pixels.x, -pixels.y) * MOUSE_AXIS_PER_PIXEL
}

/// Directional keys currently held.
pub fn read_move_keys(keyboard: &ButtonInput<KeyCode>) -> MoveKeys {
    MoveKeys {
        forward: keyboard.pressed(KeyCode::KeyW),
        backward: keyboard.pressed(KeyCode::KeyS),
        left: keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::KeyD),
    }
}

/// Latch a jump on the possessed motor. Runs every frame so presses shorter
/// than a fixed tick still reach the next tick.
pub fn latch_jump(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut motors: Query<&mut Motor, With<Possessed>>,
) {
    if !keyboard.pressed(KeyCode::Space) {
        return;
    }
    for mut motor in motors.iter_mut() {
        motor.request_jump();
    }
}

/// Sum this frame's mouse motion. Motion is discarded while the cursor is free.
pub fn gather_mouse_motion(
    mut mouse_motion: MessageReader<MouseMotion>,
    cursor: Query<&CursorOptions, With<PrimaryWindow>>,
    mut look: ResMut<MouseLook>,
) {
    let mut pixels = Vec2::ZERO;
    for motion in mouse_motion.read() {
        pixels += motion.delta;
    }

    let grabbed = cursor
        .single()
        .map(|c| c.grab_mode != CursorGrabMode::None)
        .unwrap_or(false);

    look.delta = if grabbed { mouse_axis(pixels) } else { Vec2::ZERO };
}

fn set_cursor_grab(cursor: &mut CursorOptions, grabbed: bool) {
    if grabbed {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Lock and hide the cursor at startup.
pub fn lock_cursor_on_start(mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor.single_mut() {
        set_cursor_grab(&mut cursor, true);
    }
}

/// Escape frees the cursor, left click grabs it again.
pub fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        set_cursor_grab(&mut cursor, false);
        info!("Cursor released");
    } else if mouse_button.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        set_cursor_grab(&mut cursor, true);
        info!("Cursor grabbed");
    }
}
