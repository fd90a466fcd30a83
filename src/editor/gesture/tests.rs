//! Unit tests for tool dispatch.

use bevy::prelude::*;

use crate::editor::coords::CellSize;
use crate::editor::history::CommandHistory;
use crate::editor::palette::Palette;
use crate::editor::tools::EditorTool;
use crate::map::{FenceEdge, MapLayer, ObjectSlot, TileGrid, TintColor};

use super::{Gesture, GestureContext, GestureOutcome, LabelRequest};

const CELL: f32 = 32.0;

struct Fixture {
    grid: TileGrid,
    palette: Palette,
    history: CommandHistory,
}

impl Fixture {
    fn new(width: u32, height: u32) -> Self {
        Self {
            grid: TileGrid::new(width, height).unwrap(),
            palette: Palette::default(),
            history: CommandHistory::default(),
        }
    }

    /// Run a full gesture through the given pixel samples
    fn drag(&mut self, tool: EditorTool, layer: MapLayer, samples: &[Vec2]) -> GestureOutcome {
        let (first, rest) = samples.split_first().unwrap();
        let mut ctx = GestureContext {
            grid: &mut self.grid,
            palette: &mut self.palette,
            cell_size: CellSize::new(CELL as u32),
        };
        let mut gesture = Gesture::begin(tool, layer, &mut ctx, *first);
        for pixel in rest {
            gesture.extend(&mut ctx, *pixel);
        }
        gesture.finish(&mut self.grid, &mut self.history)
    }

    fn click(&mut self, tool: EditorTool, pixel: Vec2) -> GestureOutcome {
        self.drag(tool, MapLayer::Surface, &[pixel])
    }

    fn terrain(&self, x: i32, y: i32) -> u32 {
        self.grid
            .terrain(IVec2::new(x, y), MapLayer::Surface)
            .unwrap_or(0)
    }

    fn set_terrain(&mut self, x: i32, y: i32, terrain: u32) {
        self.grid
            .get_or_create(IVec2::new(x, y))
            .unwrap()
            .layer_mut(MapLayer::Surface)
            .terrain = terrain;
    }
}

fn center(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * CELL + CELL / 2.0, y as f32 * CELL + CELL / 2.0)
}

/// Middle of the top edge zone of a tile
fn top_zone(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * CELL + 12.0, y as f32 * CELL + 2.0)
}

/// Middle of the left edge zone of a tile
fn left_zone(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * CELL + 2.0, y as f32 * CELL + 12.0)
}

#[test]
fn test_pencil_drag_is_one_undo_step() {
    let mut fx = Fixture::new(10, 10);
    fx.palette.terrain = 3;

    let outcome = fx.drag(
        EditorTool::TerrainPencil,
        MapLayer::Surface,
        &[center(1, 1), center(2, 1), center(2, 1), center(3, 1)],
    );
    // The repeated sample on (2, 1) is a no-op and is not recorded
    assert_eq!(outcome, GestureOutcome::Committed { edits: 3 });
    assert_eq!(fx.terrain(2, 1), 3);
    assert_eq!(fx.history.undo_count(), 1);

    fx.history.undo(&mut fx.grid);
    assert_eq!(fx.grid.tile_count(), 0);
}

#[test]
fn test_gesture_without_edits_is_not_committed() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.terrain = 2;
    fx.set_terrain(1, 1, 2);

    // Same value already there
    assert_eq!(fx.click(EditorTool::TerrainPencil, center(1, 1)), GestureOutcome::Nothing);
    // Outside the map
    assert_eq!(fx.click(EditorTool::TerrainPencil, center(9, 9)), GestureOutcome::Nothing);
    // Erasing what is already empty
    assert_eq!(fx.click(EditorTool::TerrainEraser, center(0, 0)), GestureOutcome::Nothing);

    assert!(!fx.history.can_undo());
    assert_eq!(fx.grid.tile_count(), 1);
}

#[test]
fn test_brush_radius_one_changes_plus_shape() {
    let mut fx = Fixture::new(10, 10);
    fx.palette.terrain = 4;
    fx.palette.set_brush_radius(1);

    let outcome = fx.click(EditorTool::TerrainBrush, center(5, 5));
    assert_eq!(outcome, GestureOutcome::Committed { edits: 5 });

    let changed: Vec<IVec2> = fx
        .grid
        .tiles()
        .filter(|t| t.layer(MapLayer::Surface).terrain == 4)
        .map(|t| t.pos())
        .collect();
    assert_eq!(changed.len(), 5);
    for pos in [(5, 5), (4, 5), (6, 5), (5, 4), (5, 6)] {
        assert_eq!(fx.terrain(pos.0, pos.1), 4, "{pos:?}");
    }

    assert!(fx.history.undo(&mut fx.grid));
    for pos in [(5, 5), (4, 5), (6, 5), (5, 4), (5, 6)] {
        assert_eq!(fx.terrain(pos.0, pos.1), 0);
    }
    assert!(!fx.history.can_undo());
}

#[test]
fn test_fill_uniform_region() {
    let mut fx = Fixture::new(8, 8);
    // 3x2 block of terrain 7 surrounded by terrain 1
    for y in 0..8 {
        for x in 0..8 {
            let inside = (2..5).contains(&x) && (3..5).contains(&y);
            fx.set_terrain(x, y, if inside { 7 } else { 1 });
        }
    }
    fx.palette.terrain = 9;

    let outcome = fx.click(EditorTool::TerrainFill, center(3, 4));
    assert_eq!(outcome, GestureOutcome::Committed { edits: 6 });

    let mut nines = 0;
    for y in 0..8 {
        for x in 0..8 {
            let inside = (2..5).contains(&x) && (3..5).contains(&y);
            let expected = if inside { 9 } else { 1 };
            assert_eq!(fx.terrain(x, y), expected);
            if fx.terrain(x, y) == 9 {
                nines += 1;
            }
        }
    }
    assert_eq!(nines, 6);
}

#[test]
fn test_fill_fires_once_per_gesture() {
    let mut fx = Fixture::new(6, 6);
    for x in 0..6 {
        fx.set_terrain(x, 2, 5);
    }
    fx.palette.terrain = 3;

    // Seed in the top band; dragging into the bottom band must not refill
    let outcome = fx.drag(
        EditorTool::TerrainFill,
        MapLayer::Surface,
        &[center(0, 0), center(0, 4), center(3, 5)],
    );
    assert_eq!(outcome, GestureOutcome::Committed { edits: 12 });
    assert_eq!(fx.terrain(0, 4), 0);
    assert_eq!(fx.terrain(0, 1), 3);
}

#[test]
fn test_fill_with_same_value_does_nothing() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.terrain = 0;
    assert_eq!(fx.click(EditorTool::TerrainFill, center(1, 1)), GestureOutcome::Nothing);
    assert_eq!(fx.grid.tile_count(), 0);
}

#[test]
fn test_fill_respects_layer() {
    let mut fx = Fixture::new(3, 3);
    fx.palette.terrain = 2;
    let outcome = fx.drag(EditorTool::TerrainFill, MapLayer::Cave, &[center(0, 0)]);
    assert_eq!(outcome, GestureOutcome::Committed { edits: 9 });
    assert_eq!(fx.grid.terrain(IVec2::new(2, 2), MapLayer::Cave), Some(2));
    assert_eq!(fx.grid.terrain(IVec2::new(2, 2), MapLayer::Surface), Some(0));
}

#[test]
fn test_overlay_fill_and_eraser() {
    let mut fx = Fixture::new(4, 4);
    let red = TintColor::rgba(255, 0, 0, 100);
    fx.palette.overlay_color = Some(red);

    let outcome = fx.click(EditorTool::OverlayFill, center(0, 0));
    assert_eq!(outcome, GestureOutcome::Committed { edits: 16 });
    assert_eq!(
        fx.grid.overlay_color(IVec2::new(3, 3), MapLayer::Surface),
        Some(Some(red))
    );

    fx.click(EditorTool::OverlayEraser, center(3, 3));
    assert_eq!(
        fx.grid.overlay_color(IVec2::new(3, 3), MapLayer::Surface),
        Some(None)
    );

    // A slightly different color is a different region
    fx.palette.overlay_color = Some(TintColor::rgba(255, 0, 0, 101));
    let outcome = fx.click(EditorTool::OverlayFill, center(3, 3));
    assert_eq!(outcome, GestureOutcome::Committed { edits: 1 });
}

#[test]
fn test_overlay_brush_tints_plus_shape() {
    let mut fx = Fixture::new(10, 10);
    let blue = TintColor::rgba(0, 0, 255, 120);
    fx.palette.overlay_color = Some(blue);
    fx.palette.set_brush_radius(1);
    // One tile of the footprint already exists, untinted
    fx.set_terrain(4, 5, 2);

    let outcome = fx.click(EditorTool::OverlayBrush, center(5, 5));
    assert_eq!(outcome, GestureOutcome::Committed { edits: 5 });
    assert_eq!(fx.history.undo_count(), 1);

    let tinted: Vec<IVec2> = fx
        .grid
        .tiles()
        .filter(|t| t.layer(MapLayer::Surface).overlay == Some(blue))
        .map(|t| t.pos())
        .collect();
    assert_eq!(tinted.len(), 5);
    for pos in [(5, 5), (4, 5), (6, 5), (5, 4), (5, 6)] {
        assert_eq!(
            fx.grid.overlay_color(IVec2::new(pos.0, pos.1), MapLayer::Surface),
            Some(Some(blue)),
            "{pos:?}"
        );
    }

    assert!(fx.history.undo(&mut fx.grid));
    assert_eq!(
        fx.grid.overlay_color(IVec2::new(4, 5), MapLayer::Surface),
        Some(None)
    );
    for pos in [(5, 5), (6, 5), (5, 4), (5, 6)] {
        assert_eq!(fx.grid.tile(IVec2::new(pos.0, pos.1)), None, "{pos:?}");
    }
    assert_eq!(fx.grid.tile_count(), 1);
}

#[test]
fn test_overlay_pencil_sets_only_when_changed() {
    let mut fx = Fixture::new(4, 4);
    fx.set_terrain(1, 1, 3);

    // "No tint" onto an untinted tile changes nothing
    fx.palette.overlay_color = None;
    assert_eq!(fx.click(EditorTool::OverlayPencil, center(1, 1)), GestureOutcome::Nothing);
    assert_eq!(fx.click(EditorTool::OverlayPencil, center(2, 2)), GestureOutcome::Nothing);
    assert!(!fx.history.can_undo());
    assert_eq!(fx.grid.tile_count(), 1);

    let green = TintColor::rgba(0, 255, 0, 90);
    fx.palette.overlay_color = Some(green);
    let outcome = fx.drag(
        EditorTool::OverlayPencil,
        MapLayer::Surface,
        &[center(1, 1), center(1, 1), center(2, 1)],
    );
    assert_eq!(outcome, GestureOutcome::Committed { edits: 2 });
    assert_eq!(
        fx.grid.overlay_color(IVec2::new(2, 1), MapLayer::Surface),
        Some(Some(green))
    );

    // Same tint again records nothing
    assert_eq!(fx.click(EditorTool::OverlayPencil, center(1, 1)), GestureOutcome::Nothing);
    assert_eq!(fx.history.undo_count(), 1);
}

#[test]
fn test_object_pencil_uses_sub_cell_slot() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.object = 12;

    // Bottom-right third of tile (1, 2)
    let pixel = Vec2::new(CELL + 30.0, 2.0 * CELL + 30.0);
    fx.click(EditorTool::ObjectPencil, pixel);

    let pos = IVec2::new(1, 2);
    let slot = ObjectSlot::new(8).unwrap();
    assert_eq!(fx.grid.object(pos, MapLayer::Surface, slot), Some(12));
    assert_eq!(
        fx.grid.object(pos, MapLayer::Surface, ObjectSlot::CENTER),
        Some(0)
    );

    fx.click(EditorTool::ObjectEraser, pixel);
    assert_eq!(fx.grid.object(pos, MapLayer::Surface, slot), Some(0));
}

#[test]
fn test_fence_pencil_encodes_edges() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.fence = 3;

    fx.click(EditorTool::FencePencil, top_zone(1, 1));
    fx.click(EditorTool::FencePencil, left_zone(2, 1));

    let layer = MapLayer::Surface;
    assert_eq!(fx.grid.fence_edge(IVec2::new(1, 1), layer, FenceEdge::Top), Some(3));
    assert_eq!(fx.grid.fence_edge(IVec2::new(2, 1), layer, FenceEdge::Left), Some(4));

    // Right zone of (0, 0) is the left edge of (1, 0)
    fx.click(EditorTool::FencePencil, Vec2::new(30.0, 12.0));
    assert_eq!(fx.grid.fence_edge(IVec2::new(1, 0), layer, FenceEdge::Left), Some(4));

    // Corner dead zone
    let before = fx.grid.clone();
    assert_eq!(
        fx.click(EditorTool::FencePencil, Vec2::new(2.0, 2.0)),
        GestureOutcome::Nothing
    );
    assert_eq!(fx.grid, before);
}

#[test]
fn test_fence_eraser_writes_sentinel() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.fence = 0;
    fx.click(EditorTool::FencePencil, left_zone(0, 0));
    assert_eq!(
        fx.grid.fence_edge(IVec2::ZERO, MapLayer::Surface, FenceEdge::Left),
        Some(1)
    );

    fx.click(EditorTool::FenceEraser, left_zone(0, 0));
    assert_eq!(
        fx.grid.fence_edge(IVec2::ZERO, MapLayer::Surface, FenceEdge::Left),
        Some(0)
    );
}

#[test]
fn test_fence_line_covers_each_edge_once() {
    let mut fx = Fixture::new(10, 10);
    fx.palette.fence = 2;

    // Anchor on the top edge of (1, 3), wander to (5, 7) and back to (4, 3)
    let outcome = fx.drag(
        EditorTool::FenceLine,
        MapLayer::Surface,
        &[top_zone(1, 3), center(3, 5), center(5, 7), center(4, 3)],
    );
    assert_eq!(outcome, GestureOutcome::Committed { edits: 5 });

    for x in 1..=5 {
        assert_eq!(
            fx.grid.fence_edge(IVec2::new(x, 3), MapLayer::Surface, FenceEdge::Top),
            Some(2)
        );
    }
    // Nothing off the anchor row
    assert!(fx.grid.tile(IVec2::new(5, 7)).is_none());

    fx.history.undo(&mut fx.grid);
    assert_eq!(fx.grid.tile_count(), 0);
}

#[test]
fn test_fence_line_vertical_uses_left_offset() {
    let mut fx = Fixture::new(6, 6);
    fx.palette.fence = 1;

    let outcome = fx.drag(
        EditorTool::FenceLine,
        MapLayer::Cave,
        &[left_zone(2, 0), center(4, 2)],
    );
    assert_eq!(outcome, GestureOutcome::Committed { edits: 3 });
    for y in 0..=2 {
        assert_eq!(
            fx.grid.fence_edge(IVec2::new(2, y), MapLayer::Cave, FenceEdge::Left),
            Some(2)
        );
    }
}

#[test]
fn test_fence_line_anchors_on_first_resolved_sample() {
    let mut fx = Fixture::new(6, 6);

    // Starts in a dead zone, anchors once the pointer reaches an edge zone
    let outcome = fx.drag(
        EditorTool::FenceLine,
        MapLayer::Surface,
        &[Vec2::new(2.0, 2.0), top_zone(2, 0), center(3, 0)],
    );
    assert_eq!(outcome, GestureOutcome::Committed { edits: 2 });
    assert!(fx.grid.tile(IVec2::ZERO).is_none());
}

#[test]
fn test_pickers_read_into_palette() {
    let mut fx = Fixture::new(4, 4);
    {
        let data = fx
            .grid
            .get_or_create(IVec2::new(1, 1))
            .unwrap()
            .layer_mut(MapLayer::Surface);
        data.terrain = 6;
        data.objects[4] = 8;
        data.fence_left = 5;
        data.overlay = Some(TintColor::rgb(0, 0, 255));
    }
    let before = fx.grid.clone();

    fx.click(EditorTool::TerrainPicker, center(1, 1));
    fx.click(EditorTool::ObjectPicker, center(1, 1));
    fx.click(EditorTool::FencePicker, left_zone(1, 1));
    let outcome = fx.click(EditorTool::OverlayPicker, center(1, 1));

    assert_eq!(outcome, GestureOutcome::Nothing);
    assert_eq!(fx.palette.terrain, 6);
    assert_eq!(fx.palette.object, 8);
    // Left edges store id + 1
    assert_eq!(fx.palette.fence, 4);
    assert_eq!(fx.palette.overlay_color, Some(TintColor::rgb(0, 0, 255)));
    assert_eq!(fx.grid, before);
    assert!(!fx.history.can_undo());
}

#[test]
fn test_picker_on_absent_tile_keeps_palette() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.terrain = 5;
    fx.click(EditorTool::TerrainPicker, center(2, 2));
    assert_eq!(fx.palette.terrain, 5);
    assert_eq!(fx.grid.tile_count(), 0);
}

#[test]
fn test_fence_picker_clamps_unset_left_edge() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.fence = 7;
    fx.grid.get_or_create(IVec2::new(1, 1)).unwrap();
    fx.click(EditorTool::FencePicker, left_zone(1, 1));
    assert_eq!(fx.palette.fence, 0);
}

#[test]
fn test_label_gesture_requests_text() {
    let mut fx = Fixture::new(4, 4);
    let outcome = fx.drag(
        EditorTool::Label,
        MapLayer::Cave,
        &[center(0, 0), center(2, 3)],
    );
    let GestureOutcome::LabelRequested(request) = outcome else {
        panic!("expected a label request, got {outcome:?}");
    };
    assert_eq!(
        request,
        LabelRequest {
            pos: IVec2::new(2, 3),
            layer: MapLayer::Cave
        }
    );
    assert_eq!(fx.grid.tile_count(), 0);

    let white = TintColor::rgb(255, 255, 255);
    assert!(request.commit(&mut fx.grid, &mut fx.history, "Cave entrance", white));
    let label = fx.grid.label(IVec2::new(2, 3), MapLayer::Cave).flatten().unwrap();
    assert_eq!(label.text, "Cave entrance");
    assert_eq!(fx.history.undo_count(), 1);

    // Same text again changes nothing
    assert!(!request.commit(&mut fx.grid, &mut fx.history, "Cave entrance", white));

    // Blank text clears
    assert!(request.commit(&mut fx.grid, &mut fx.history, "   ", white));
    assert_eq!(fx.grid.label(IVec2::new(2, 3), MapLayer::Cave), Some(None));

    fx.history.undo(&mut fx.grid);
    fx.history.undo(&mut fx.grid);
    assert_eq!(fx.grid.tile_count(), 0);
}

#[test]
fn test_label_outside_map_requests_nothing() {
    let mut fx = Fixture::new(2, 2);
    assert_eq!(fx.click(EditorTool::Label, center(5, 5)), GestureOutcome::Nothing);
}

#[test]
fn test_cancel_reverts_applied_edits() {
    let mut fx = Fixture::new(5, 5);
    fx.palette.terrain = 1;
    let before = fx.grid.clone();

    let mut ctx = GestureContext {
        grid: &mut fx.grid,
        palette: &mut fx.palette,
        cell_size: CellSize::new(32),
    };
    let mut gesture = Gesture::begin(EditorTool::TerrainPencil, MapLayer::Surface, &mut ctx, center(0, 0));
    gesture.extend(&mut ctx, center(1, 0));
    assert_eq!(gesture.pending_edits(), 2);

    gesture.cancel(&mut fx.grid);
    assert_eq!(fx.grid, before);
    assert!(!fx.history.can_undo());
}

#[test]
fn test_layers_are_independent() {
    let mut fx = Fixture::new(4, 4);
    fx.palette.terrain = 3;
    fx.drag(EditorTool::TerrainPencil, MapLayer::Cave, &[center(1, 1)]);
    assert_eq!(fx.grid.terrain(IVec2::new(1, 1), MapLayer::Cave), Some(3));
    assert_eq!(fx.grid.terrain(IVec2::new(1, 1), MapLayer::Surface), Some(0));
}
