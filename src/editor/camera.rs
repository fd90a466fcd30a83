use bevy::prelude::*;

use crate::map::TileGrid;

use super::coords::{pixel_to_world, CellSize};

#[derive(Component)]
pub struct EditorCamera;

/// World position of the map's center for the current grid and cell size
fn map_center(grid: &TileGrid, cell_size: CellSize) -> Vec2 {
    let extent = grid.size().as_vec2() * cell_size.as_f32();
    pixel_to_world(extent / 2.0)
}

pub fn spawn_camera(mut commands: Commands, grid: Res<TileGrid>, cell_size: Res<CellSize>) {
    let center = map_center(&grid, *cell_size);
    commands.spawn((
        Camera2d,
        EditorCamera,
        Transform::from_translation(center.extend(1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<&mut Transform, With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        transform.translation.x -= event.delta.x;
        transform.translation.y += event.delta.y;
    }
}

/// Home re-centers the view on the map
pub fn recenter_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    grid: Res<TileGrid>,
    cell_size: Res<CellSize>,
    mut camera_query: Query<&mut Transform, With<EditorCamera>>,
) {
    if !keyboard.just_pressed(KeyCode::Home) {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let center = map_center(&grid, *cell_size);
    transform.translation.x = center.x;
    transform.translation.y = center.y;
}
