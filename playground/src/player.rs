//! Controller entities: spawning, fixed-tick movement and possession.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use motion::{
    BodyState, GroundContacts, LookState, MotionConfig, MotionMode, Motor, MoveKeys, PlanarBasis,
    TickInput, PIVOT_HEIGHT, PLAYER_HEIGHT, PLAYER_RADIUS,
};

use crate::config::PlaygroundConfig;
use crate::contacts::track_ground_contacts;
use crate::input::read_move_keys;

// =============================================================================
// COMPONENTS
// =============================================================================

/// The controller currently driven by keyboard and mouse.
#[derive(Component)]
pub struct Possessed;

/// Marker for the entity the camera rotates around.
#[derive(Component)]
pub struct CameraPivot;

/// Body -> camera pivot child.
#[derive(Component, Clone, Copy)]
pub struct PivotLink(pub Entity);

/// Spawn order, used to cycle possession.
#[derive(Component, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ControllerSlot(pub u8);

// =============================================================================
// SPAWNING
// =============================================================================

const KINEMATIC_SPAWN: Vec3 = Vec3::new(-3.0, PLAYER_HEIGHT * 0.5, 4.0);
const RIGID_BODY_SPAWN: Vec3 = Vec3::new(3.0, PLAYER_HEIGHT * 0.5 + 1.0, 4.0);

/// Spawn one kinematic and one rigid-body controller. The kinematic one starts
/// possessed.
pub fn spawn_controllers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlaygroundConfig>,
) {
    let capsule = meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_HEIGHT - 2.0 * PLAYER_RADIUS));

    let kinematic = commands
        .spawn((
            Name::new("Kinematic controller"),
            ControllerSlot(0),
            Possessed,
            Motor::new(MotionMode::Kinematic),
            config.0.clone(),
            LookState::default(),
            Mesh3d(capsule.clone()),
            MeshMaterial3d(materials.add(Color::srgb(0.2, 0.5, 0.9))),
            Transform::from_translation(KINEMATIC_SPAWN),
        ))
        .id();
    attach_pivot(&mut commands, kinematic, true);

    let rigid_body = commands
        .spawn((
            Name::new("Rigid body controller"),
            ControllerSlot(1),
            Motor::new(MotionMode::RigidBody),
            config.0.clone(),
            LookState::default(),
            GroundContacts::default(),
            Mesh3d(capsule),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.4, 0.2))),
            Transform::from_translation(RIGID_BODY_SPAWN),
        ))
        .insert(rigid_body_physics())
        .id();
    attach_pivot(&mut commands, rigid_body, false);

    info!("Spawned kinematic and rigid body controllers (Tab switches)");
}

/// Rapier components of a rigid-body controller.
///
/// Collider friction stays at rapier's default: with no input the motor
/// leaves planar velocity alone and friction is what brings the body to rest.
pub fn rigid_body_physics() -> impl Bundle {
    (
        RigidBody::Dynamic,
        Collider::capsule_y(PLAYER_HEIGHT * 0.5 - PLAYER_RADIUS, PLAYER_RADIUS),
        LockedAxes::ROTATION_LOCKED,
        Velocity::zero(),
        ActiveEvents::COLLISION_EVENTS,
    )
}

fn attach_pivot(commands: &mut Commands, body: Entity, active: bool) {
    let pivot = commands
        .spawn((
            CameraPivot,
            Camera3d::default(),
            Camera {
                is_active: active,
                ..default()
            },
            Tonemapping::AcesFitted,
            Transform::from_xyz(0.0, PIVOT_HEIGHT, 0.0),
        ))
        .id();

    commands.entity(body).add_child(pivot).insert(PivotLink(pivot));
}

// =============================================================================
// FIXED TICK
// =============================================================================

/// Schedules the motor tick inside rapier's fixed step.
///
/// rapier runs its sets in `FixedUpdate` too, so the tick is pinned before
/// `PhysicsSet::SyncBackend`: velocities written here are stepped in the same
/// tick and cannot be overwritten by writeback. Contacts are counted first so
/// the motor sees the latest grounded state.
pub struct MotorTickPlugin;

impl Plugin for MotorTickPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (track_ground_contacts, tick_motors)
                .chain()
                .before(PhysicsSet::SyncBackend),
        );
    }
}

/// Advance every motor by one fixed tick.
///
/// Kinematic motors move their transform directly. Rigid-body motors read
/// and write the rapier velocity.
pub fn tick_motors(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    pivots: Query<&Transform, (With<CameraPivot>, Without<Motor>)>,
    mut bodies: Query<
        (
            &mut Motor,
            &MotionConfig,
            &PivotLink,
            &mut Transform,
            Option<&mut Velocity>,
            Option<&GroundContacts>,
            Has<Possessed>,
        ),
        Without<CameraPivot>,
    >,
    mut warned_missing_velocity: Local<bool>,
) {
    let dt = time.delta_secs();
    let held = read_move_keys(&keyboard);

    for (mut motor, config, pivot, mut transform, velocity, contacts, possessed) in bodies.iter_mut() {
        let keys = if possessed { held } else { MoveKeys::default() };

        // The body never rotates, so the pivot's local rotation is its world rotation.
        let basis = pivots
            .get(pivot.0)
            .map(|p| PlanarBasis::from_rotation(p.rotation))
            .unwrap_or_default();

        let body = BodyState {
            velocity: velocity.as_ref().map_or(motor.velocity, |v| v.linvel),
            grounded: contacts.is_some_and(GroundContacts::is_grounded),
        };

        let outcome = motor.tick(config, &TickInput { keys, basis }, body, dt);

        match motor.mode {
            MotionMode::Kinematic => transform.translation += outcome.displacement,
            MotionMode::RigidBody => match velocity {
                Some(mut velocity) => velocity.linvel = outcome.velocity,
                None => {
                    if !*warned_missing_velocity {
                        warn!("Rigid body motor without a Velocity component; movement is ignored");
                        *warned_missing_velocity = true;
                    }
                }
            },
        }

        if outcome.jumped {
            debug!("Jump: vertical velocity set to {}", outcome.velocity.y);
        }
    }
}

// =============================================================================
// POSSESSION
// =============================================================================

/// Tab hands keyboard and mouse to the next controller and activates its camera.
pub fn cycle_possession(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    bodies: Query<(Entity, &ControllerSlot, &PivotLink, &Name, Has<Possessed>)>,
    mut cameras: Query<&mut Camera, With<CameraPivot>>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }

    let mut order: Vec<_> = bodies.iter().collect();
    if order.is_empty() {
        return;
    }
    order.sort_by_key(|(_, slot, ..)| **slot);

    let current = order.iter().position(|(.., possessed)| *possessed).unwrap_or(0);
    let next = (current + 1) % order.len();

    for (i, (entity, _, pivot, name, _)) in order.iter().enumerate() {
        let active = i == next;
        if active {
            commands.entity(*entity).insert(Possessed);
            info!("Possessing {}", name);
        } else {
            commands.entity(*entity).remove::<Possessed>();
        }
        if let Ok(mut camera) = cameras.get_mut(pivot.0) {
            camera.is_active = active;
        }
    }
}
