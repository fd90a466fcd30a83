//! Gizmo preview of the map, drawn from the grid's read queries only.
//!
//! Only the selected layer is shown. Everything is redrawn each frame.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::map::{FenceEdge, ObjectSlot, TileGrid, TileLayerData, EMPTY_ID, OBJECT_SLOTS};
use crate::theme;

use super::camera::EditorCamera;
use super::coords::{pixel_to_world, resolve_target, tile_at, CellSize, EditTarget};
use super::params::{is_cursor_over_ui, CameraParams};
use super::tools::{CurrentTool, SelectedLayer};

/// Fill a rectangle with horizontal lines (gizmos only draw outlines)
fn fill_rect(gizmos: &mut Gizmos, center: Vec2, size: Vec2, color: Color) {
    let half = size / 2.0;
    let mut y = -half.y;
    while y <= half.y {
        gizmos.line_2d(
            center + Vec2::new(-half.x, y),
            center + Vec2::new(half.x, y),
            color,
        );
        y += 2.0;
    }
}

/// World-space center of a tile
fn tile_center(cell: CellSize, pos: IVec2) -> Vec2 {
    pixel_to_world(cell.tile_center(pos))
}

/// World-space endpoints of a tile's owned edge
fn edge_segment(cell: CellSize, owner: IVec2, edge: FenceEdge) -> (Vec2, Vec2) {
    let origin = cell.tile_origin(owner);
    let end = match edge {
        FenceEdge::Top => origin + Vec2::new(cell.as_f32(), 0.0),
        FenceEdge::Left => origin + Vec2::new(0.0, cell.as_f32()),
    };
    (pixel_to_world(origin), pixel_to_world(end))
}

/// World-space center of an object slot
fn slot_center(cell: CellSize, pos: IVec2, slot: ObjectSlot) -> Vec2 {
    let third = cell.as_f32() / 3.0;
    let col = (slot.index() % 3) as f32;
    let row = (slot.index() / 3) as f32;
    let local = Vec2::new((col + 0.5) * third, (row + 0.5) * third);
    pixel_to_world(cell.tile_origin(pos) + local)
}

fn draw_tile(gizmos: &mut Gizmos, cell: CellSize, pos: IVec2, data: &TileLayerData) {
    let size = cell.as_f32();
    let center = tile_center(cell, pos);

    if data.terrain != EMPTY_ID {
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            Vec2::splat(size - 4.0),
            theme::terrain_color(data.terrain),
        );
    }

    if let Some(tint) = data.overlay {
        fill_rect(gizmos, center, Vec2::splat(size), tint.into());
    }

    for index in 0..OBJECT_SLOTS {
        let Some(slot) = ObjectSlot::new(index) else {
            continue;
        };
        if data.object(slot) != EMPTY_ID {
            gizmos.circle_2d(
                Isometry2d::from_translation(slot_center(cell, pos, slot)),
                size / 8.0,
                theme::OBJECT_MARKER,
            );
        }
    }

    for edge in [FenceEdge::Top, FenceEdge::Left] {
        if data.fence(edge) != EMPTY_ID {
            let (start, end) = edge_segment(cell, pos, edge);
            gizmos.line_2d(start, end, theme::FENCE_COLOR);
        }
    }
}

pub fn draw_map_preview(
    mut gizmos: Gizmos,
    grid: Res<TileGrid>,
    cell_size: Res<CellSize>,
    selected_layer: Res<SelectedLayer>,
) {
    let cell = *cell_size;
    let size = cell.as_f32();
    let extent = grid.size().as_vec2() * size;

    // Grid lines get too dense to be useful at the smallest sizes
    if cell.pixels() >= 8 {
        for x in 1..grid.width() {
            let px = x as f32 * size;
            gizmos.line_2d(
                pixel_to_world(Vec2::new(px, 0.0)),
                pixel_to_world(Vec2::new(px, extent.y)),
                theme::GRID_COLOR,
            );
        }
        for y in 1..grid.height() {
            let py = y as f32 * size;
            gizmos.line_2d(
                pixel_to_world(Vec2::new(0.0, py)),
                pixel_to_world(Vec2::new(extent.x, py)),
                theme::GRID_COLOR,
            );
        }
    }

    gizmos.rect_2d(
        Isometry2d::from_translation(pixel_to_world(extent / 2.0)),
        extent,
        theme::MAP_BORDER,
    );

    for tile in grid.tiles() {
        let data = tile.layer(selected_layer.layer);
        if !data.is_empty() {
            draw_tile(&mut gizmos, cell, tile.pos(), data);
        }
    }
}

/// Highlight the tile under the cursor and the zone the active tool would edit
pub fn draw_hover(
    mut gizmos: Gizmos,
    camera: CameraParams,
    grid: Res<TileGrid>,
    cell_size: Res<CellSize>,
    current_tool: Res<CurrentTool>,
    mut contexts: EguiContexts,
) {
    if is_cursor_over_ui(&mut contexts) {
        return;
    }
    let Some(pixel) = camera.cursor_pixel_pos() else {
        return;
    };

    let cell = *cell_size;
    let Some(target) = resolve_target(&grid, pixel, cell, current_tool.tool.target_zone()) else {
        return;
    };

    let tile = match target {
        EditTarget::Fence(_) => tile_at(pixel, cell),
        _ => target.tile(),
    };
    gizmos.rect_2d(
        Isometry2d::from_translation(tile_center(cell, tile)),
        Vec2::splat(cell.as_f32()),
        theme::HOVER_COLOR,
    );

    match target {
        EditTarget::Tile(_) => {}
        EditTarget::Object(pos, slot) => {
            gizmos.rect_2d(
                Isometry2d::from_translation(slot_center(cell, pos, slot)),
                Vec2::splat(cell.as_f32() / 3.0),
                theme::HOVER_ZONE_COLOR,
            );
        }
        EditTarget::Fence(fence) => {
            let (start, end) = edge_segment(cell, fence.owner, fence.edge);
            gizmos.line_2d(start, end, theme::HOVER_ZONE_COLOR);
        }
    }
}

/// Tile labels on the selected layer, drawn with egui at the tile centers
pub fn render_tile_labels(
    mut contexts: EguiContexts,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    grid: Res<TileGrid>,
    cell_size: Res<CellSize>,
    selected_layer: Res<SelectedLayer>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let layer = selected_layer.layer;
    for tile in grid.tiles() {
        let Some(label) = tile.layer(layer).label.as_ref() else {
            continue;
        };

        let world_pos = tile_center(*cell_size, tile.pos());
        let Ok(screen_pos) = camera.world_to_viewport(camera_transform, world_pos.extend(0.0))
        else {
            continue;
        };

        egui::Area::new(egui::Id::new(("tile_label", tile.pos().x, tile.pos().y)))
            .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
            .pivot(egui::Align2::CENTER_CENTER)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&label.text).color(theme::tint_to_egui(label.color)),
                );
            });
    }
}
