//! Static test scene: floor, crates, a ramp and a light.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Crates as (center, half extents). The two overlapping ones let the rigid
/// body stand on two colliders at once.
const CRATES: [(Vec3, Vec3); 4] = [
    (Vec3::new(0.0, 0.5, -6.0), Vec3::new(1.0, 0.5, 1.0)),
    (Vec3::new(1.8, 0.5, -6.0), Vec3::new(1.0, 0.5, 1.0)),
    (Vec3::new(-6.0, 1.0, -3.0), Vec3::new(1.0, 1.0, 1.0)),
    (Vec3::new(7.0, 1.5, 0.0), Vec3::new(0.5, 1.5, 6.0)),
];

const FLOOR_HALF_EXTENT: f32 = 25.0;
const FLOOR_THICKNESS: f32 = 0.5;

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    transform: Transform,
    half_extents: Vec3,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
        MeshMaterial3d(material),
        transform,
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
    ));
}

/// Spawn the scene geometry and lighting.
pub fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_material = materials.add(Color::srgb(0.35, 0.38, 0.35));
    let crate_material = materials.add(Color::srgb(0.6, 0.45, 0.3));

    spawn_block(
        &mut commands,
        &mut meshes,
        floor_material.clone(),
        Transform::from_xyz(0.0, -FLOOR_THICKNESS * 0.5, 0.0),
        Vec3::new(FLOOR_HALF_EXTENT, FLOOR_THICKNESS * 0.5, FLOOR_HALF_EXTENT),
    );

    for (center, half_extents) in CRATES {
        spawn_block(
            &mut commands,
            &mut meshes,
            crate_material.clone(),
            Transform::from_translation(center),
            half_extents,
        );
    }

    // Ramp up to the tall crate row.
    spawn_block(
        &mut commands,
        &mut meshes,
        floor_material,
        Transform::from_xyz(3.5, 0.9, -3.0).with_rotation(Quat::from_rotation_z(0.35)),
        Vec3::new(3.0, 0.1, 1.5),
    );

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Playground scene ready");
}
