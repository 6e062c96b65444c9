use bevy::prelude::*;

use crate::log;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_DIRECTION, CAMERA_3D_DISTANCE_PER_CELL, CAMERA_3D_FOV,
};
use crate::utils::constants::sticker_constants::{
    BACKGROUND_COLOR, BACKING_COLOR, BACKING_OFFSET, STICKER_COLORS, STICKER_SCALE,
};
use crate::utils::objects::{CubeRoot, FaceMarker, GameEntity, PersistentCamera};
use crate::utils::puzzle::Puzzle;
use crate::utils::solved::SIDE_NORMALS;

/// Camera position for a puzzle of `order` cells of `size`.
pub fn camera_position(order: u32, size: f32) -> Vec3 {
    CAMERA_3D_DIRECTION.normalize() * CAMERA_3D_DISTANCE_PER_CELL * order as f32 * size
}

/// This camera persists across rebuilds; only its distance changes.
pub fn spawn_persistent_camera(mut commands: Commands, puzzle: Res<Puzzle>) {
    commands
        .spawn((
            Camera3d::default(),
            Projection::from(PerspectiveProjection {
                fov: CAMERA_3D_FOV,
                ..default()
            }),
            Transform::from_translation(camera_position(puzzle.order(), puzzle.config().size))
                .looking_at(Vec3::ZERO, Vec3::Y),
            PersistentCamera,
        ))
        .with_children(|parent| {
            // Light follows the camera so the visible side is always lit
            parent.spawn((
                PointLight {
                    intensity: 4_000_000.0,
                    range: 200.0,
                    ..default()
                },
                Transform::from_xyz(2.0, 3.0, 0.0),
            ));
        });
}

/// Static environment, spawned once.
pub fn setup_environment(mut commands: Commands) {
    commands.insert_resource(ClearColor(BACKGROUND_COLOR));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    log!("🧊 Twisty cube ready");
    log!("🖱️  Drag a sticker to turn a layer, drag the background to look around");
    log!("⌨️  S shuffle | U undo | Enter solve | Esc cancel | R restore | 2-9 order");
}

/// Spawns the sticker entities for the current puzzle.
pub fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    puzzle: &Puzzle,
) {
    let cube = puzzle.cube();
    let size = cube.size();

    let sticker_mesh = meshes.add(Rectangle::new(size * STICKER_SCALE, size * STICKER_SCALE));
    let backing_mesh = meshes.add(Rectangle::new(size, size));
    let backing_material = materials.add(StandardMaterial {
        base_color: BACKING_COLOR,
        perceptual_roughness: 0.9,
        ..default()
    });
    let sticker_materials: Vec<_> = STICKER_COLORS
        .iter()
        .map(|&color| {
            materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.5,
                ..default()
            })
        })
        .collect();

    commands
        .spawn((
            Transform::from_rotation(cube.orientation()),
            Visibility::default(),
            CubeRoot,
            GameEntity,
        ))
        .with_children(|parent| {
            for (face_index, face) in cube.faces().iter().enumerate() {
                let side = SIDE_NORMALS
                    .iter()
                    .position(|&normal| normal == face.sticker)
                    .unwrap_or(0);
                parent
                    .spawn((
                        Mesh3d(sticker_mesh.clone()),
                        MeshMaterial3d(sticker_materials[side].clone()),
                        face.transform,
                        FaceMarker { face_index },
                    ))
                    .with_children(|sticker| {
                        sticker.spawn((
                            Mesh3d(backing_mesh.clone()),
                            MeshMaterial3d(backing_material.clone()),
                            Transform::from_xyz(0.0, 0.0, -BACKING_OFFSET),
                        ));
                    });
            }
        });
}

/// Respawns the stickers and rescales the camera whenever the puzzle is
/// rebuilt.
pub fn rebuild_cube(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    puzzle: Res<Puzzle>,
    game_entities: Query<Entity, With<GameEntity>>,
    mut camera_query: Query<&mut Transform, With<PersistentCamera>>,
    mut spawned: Local<Option<(u64, u32)>>,
) {
    let generation = puzzle.generation();
    if spawned.is_some_and(|(last, _)| last == generation) {
        return;
    }

    for entity in &game_entities {
        commands.entity(entity).despawn();
    }
    spawn_cube(&mut commands, &mut meshes, &mut materials, &puzzle);

    // Keep the puzzle filling the same share of the view
    let order = puzzle.order();
    if let Some((_, old_order)) = *spawned
        && old_order != order
        && let Ok(mut transform) = camera_query.single_mut()
    {
        transform.translation *= order as f32 / old_order as f32;
        info!("camera distance scaled for order {order}");
    }

    *spawned = Some((generation, order));
    info!("spawned {} stickers for order {order}", puzzle.cube().faces().len());
}

/// Copies the puzzle's visual transforms onto the sticker entities.
pub fn sync_face_transforms(
    puzzle: Res<Puzzle>,
    mut root_query: Query<&mut Transform, (With<CubeRoot>, Without<FaceMarker>)>,
    mut face_query: Query<(&FaceMarker, &mut Transform), Without<CubeRoot>>,
) {
    if !puzzle.is_changed() {
        return;
    }
    let cube = puzzle.cube();

    if let Ok(mut root) = root_query.single_mut() {
        root.rotation = cube.orientation();
    }
    for (marker, mut transform) in &mut face_query {
        if let Some(face) = cube.face(marker.face_index) {
            *transform = face.transform;
        }
    }
}
