//! Tool dispatch for one pointer gesture.
//!
//! A [`Gesture`] lives from pointer-down to pointer-up. Every pointer sample
//! is resolved to an edit target for the active tool and turned into atomic
//! [`TileEdit`]s, which are applied immediately (so the next sample sees
//! them) and accumulated into one [`EditorCommand`]. Finishing the gesture
//! commits that command through the [`CommandHistory`] as a single undo step.
//!
//! Per-tool behavior:
//!
//! - Pencil/Eraser: write the palette value (or the empty value) to the target
//! - Brush: pencil over every tile within the palette's brush radius
//! - Fill: flood the region matching the seed tile, once per gesture
//! - Line: fence run from the first resolved edge along its axis
//! - Picker: copy the target's value into the palette, never edits
//! - Label: nothing while dragging; finishing yields a [`LabelRequest`]

mod brush;
mod fence_line;
mod fill;

#[cfg(test)]
mod tests;

pub use brush::brush_footprint;
pub use fence_line::FenceLine;
pub use fill::flood_region;

use bevy::prelude::*;

use crate::map::{EMPTY_ID, MapLayer, ObjectSlot, TileGrid, TileLabel, TintColor};

use super::coords::{resolve_target, tile_at, CellSize, EditTarget, FenceTarget};
use super::history::{CommandHistory, EditorCommand, TileChange, TileEdit};
use super::palette::Palette;
use super::tools::EditorTool;

/// What a gesture sample needs from the outside world
pub struct GestureContext<'a> {
    pub grid: &'a mut TileGrid,
    pub palette: &'a mut Palette,
    pub cell_size: CellSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A command with this many edits was pushed onto the history
    Committed { edits: usize },
    /// Nothing changed, nothing was recorded
    Nothing,
    /// A label gesture ended on a tile; the text still has to be collected
    LabelRequested(LabelRequest),
}

/// A label edit waiting for its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRequest {
    pub pos: IVec2,
    pub layer: MapLayer,
}

impl LabelRequest {
    /// Commit the label as a single undo step.
    ///
    /// Blank text removes the label. Returns false when nothing changed.
    pub fn commit(
        self,
        grid: &mut TileGrid,
        history: &mut CommandHistory,
        text: &str,
        color: TintColor,
    ) -> bool {
        if !grid.in_bounds(self.pos) {
            return false;
        }

        let text = text.trim();
        let to = (!text.is_empty()).then(|| TileLabel {
            text: text.to_string(),
            color,
        });
        let from = grid.label(self.pos, self.layer).flatten().cloned();
        let change = TileChange::Label { from, to };
        if change.is_noop() {
            return false;
        }

        let mut command = EditorCommand::new(EditorTool::Label);
        command.push(TileEdit::new(grid, self.pos, self.layer, change));
        history.commit(command, grid)
    }
}

/// In-progress gesture state
#[derive(Debug, Clone)]
pub struct Gesture {
    tool: EditorTool,
    layer: MapLayer,
    command: EditorCommand,
    samples: usize,
    fence_line: Option<FenceLine>,
    last_tile: Option<IVec2>,
}

impl Gesture {
    /// Start a gesture at the pointer-down position
    pub fn begin(
        tool: EditorTool,
        layer: MapLayer,
        ctx: &mut GestureContext,
        pixel: Vec2,
    ) -> Self {
        let mut gesture = Self {
            tool,
            layer,
            command: EditorCommand::new(tool),
            samples: 0,
            fence_line: None,
            last_tile: None,
        };
        gesture.sample(ctx, pixel);
        gesture
    }

    /// Feed a pointer-move sample while the button is held
    pub fn extend(&mut self, ctx: &mut GestureContext, pixel: Vec2) {
        self.sample(ctx, pixel);
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn layer(&self) -> MapLayer {
        self.layer
    }

    /// Edits applied so far and not yet committed
    pub fn pending_edits(&self) -> usize {
        self.command.len()
    }

    /// End the gesture, committing whatever it accumulated
    pub fn finish(self, grid: &mut TileGrid, history: &mut CommandHistory) -> GestureOutcome {
        if self.tool == EditorTool::Label {
            return match self.last_tile {
                Some(pos) => GestureOutcome::LabelRequested(LabelRequest {
                    pos,
                    layer: self.layer,
                }),
                None => GestureOutcome::Nothing,
            };
        }

        let edits = self.command.len();
        if history.commit(self.command, grid) {
            GestureOutcome::Committed { edits }
        } else {
            GestureOutcome::Nothing
        }
    }

    /// Revert everything the gesture applied without recording it
    pub fn cancel(mut self, grid: &mut TileGrid) {
        self.command.undo(grid);
    }

    fn sample(&mut self, ctx: &mut GestureContext, pixel: Vec2) {
        let first = self.samples == 0;
        self.samples += 1;

        let grid = &mut *ctx.grid;
        let palette = &mut *ctx.palette;
        let cell = ctx.cell_size;

        let target = resolve_target(grid, pixel, cell, self.tool.target_zone());
        if let Some(target) = target {
            self.last_tile = Some(target.tile());
        }

        match (self.tool, target) {
            (EditorTool::FenceLine, target) => {
                self.trace_fence(grid, target, tile_at(pixel, cell), palette.fence);
            }
            (_, None) => {}

            (EditorTool::TerrainPencil, Some(target)) => {
                self.set_terrain(grid, target.tile(), palette.terrain);
            }
            (EditorTool::TerrainBrush, Some(target)) => {
                for pos in brush_footprint(grid, target.tile(), palette.brush_radius) {
                    self.set_terrain(grid, pos, palette.terrain);
                }
            }
            (EditorTool::TerrainEraser, Some(target)) => {
                self.set_terrain(grid, target.tile(), EMPTY_ID);
            }
            (EditorTool::TerrainFill, Some(target)) => {
                if first {
                    self.fill_terrain(grid, target.tile(), palette.terrain);
                }
            }
            (EditorTool::TerrainPicker, Some(target)) => {
                if let Some(terrain) = grid.terrain(target.tile(), self.layer)
                    && terrain != palette.terrain
                {
                    palette.terrain = terrain;
                    debug!("Picked terrain {terrain}");
                }
            }

            (EditorTool::ObjectPencil, Some(target)) => {
                if let EditTarget::Object(pos, slot) = target {
                    self.set_object(grid, pos, slot, palette.object);
                }
            }
            (EditorTool::ObjectEraser, Some(target)) => {
                if let EditTarget::Object(pos, slot) = target {
                    self.set_object(grid, pos, slot, EMPTY_ID);
                }
            }
            (EditorTool::ObjectPicker, Some(target)) => {
                if let EditTarget::Object(pos, slot) = target
                    && let Some(object) = grid.object(pos, self.layer, slot)
                    && object != palette.object
                {
                    palette.object = object;
                    debug!("Picked object {object}");
                }
            }

            (EditorTool::FencePencil, Some(target)) => {
                if let EditTarget::Fence(fence) = target {
                    self.set_fence(grid, fence, fence.edge.encode(palette.fence));
                }
            }
            (EditorTool::FenceEraser, Some(target)) => {
                if let EditTarget::Fence(fence) = target {
                    self.set_fence(grid, fence, EMPTY_ID);
                }
            }
            (EditorTool::FencePicker, Some(target)) => {
                if let EditTarget::Fence(fence) = target
                    && let Some(stored) = grid.fence_edge(fence.owner, self.layer, fence.edge)
                {
                    let fence_id = fence.edge.decode(stored);
                    if fence_id != palette.fence {
                        palette.fence = fence_id;
                        debug!("Picked fence {fence_id}");
                    }
                }
            }

            (EditorTool::OverlayPencil, Some(target)) => {
                self.set_overlay(grid, target.tile(), palette.overlay_color);
            }
            (EditorTool::OverlayBrush, Some(target)) => {
                for pos in brush_footprint(grid, target.tile(), palette.brush_radius) {
                    self.set_overlay(grid, pos, palette.overlay_color);
                }
            }
            (EditorTool::OverlayEraser, Some(target)) => {
                self.set_overlay(grid, target.tile(), None);
            }
            (EditorTool::OverlayFill, Some(target)) => {
                if first {
                    self.fill_overlay(grid, target.tile(), palette.overlay_color);
                }
            }
            (EditorTool::OverlayPicker, Some(target)) => {
                if let Some(color) = grid.overlay_color(target.tile(), self.layer)
                    && color != palette.overlay_color
                {
                    palette.overlay_color = color;
                    debug!("Picked overlay {color:?}");
                }
            }

            // The target is collected in `last_tile`; text comes at the end
            (EditorTool::Label, Some(_)) => {}
        }
    }

    /// Apply a change now and keep it for the command. No-ops are dropped.
    fn record(&mut self, grid: &mut TileGrid, pos: IVec2, change: TileChange) {
        if change.is_noop() {
            return;
        }
        let mut edit = TileEdit::new(grid, pos, self.layer, change);
        edit.execute(grid);
        self.command.push(edit);
    }

    fn set_terrain(&mut self, grid: &mut TileGrid, pos: IVec2, to: u32) {
        let from = grid.terrain(pos, self.layer).unwrap_or(EMPTY_ID);
        self.record(grid, pos, TileChange::Terrain { from, to });
    }

    fn set_object(&mut self, grid: &mut TileGrid, pos: IVec2, slot: ObjectSlot, to: u32) {
        let from = grid.object(pos, self.layer, slot).unwrap_or(EMPTY_ID);
        self.record(grid, pos, TileChange::Object { slot, from, to });
    }

    fn set_fence(&mut self, grid: &mut TileGrid, fence: FenceTarget, to: u32) {
        let from = grid
            .fence_edge(fence.owner, self.layer, fence.edge)
            .unwrap_or(EMPTY_ID);
        let change = TileChange::Fence {
            edge: fence.edge,
            from,
            to,
        };
        self.record(grid, fence.owner, change);
    }

    fn set_overlay(&mut self, grid: &mut TileGrid, pos: IVec2, to: Option<TintColor>) {
        let from = grid.overlay_color(pos, self.layer).flatten();
        self.record(grid, pos, TileChange::Overlay { from, to });
    }

    fn fill_terrain(&mut self, grid: &mut TileGrid, seed: IVec2, to: u32) {
        let layer = self.layer;
        let original = grid.terrain(seed, layer).unwrap_or(EMPTY_ID);
        if original == to {
            return;
        }
        let view: &TileGrid = grid;
        let region = flood_region(view, seed, |pos| {
            view.terrain(pos, layer).unwrap_or(EMPTY_ID) == original
        });
        debug!("Terrain fill from {seed}: {} tiles", region.len());
        for pos in region {
            self.record(grid, pos, TileChange::Terrain { from: original, to });
        }
    }

    fn fill_overlay(&mut self, grid: &mut TileGrid, seed: IVec2, to: Option<TintColor>) {
        let layer = self.layer;
        let original = grid.overlay_color(seed, layer).flatten();
        if original == to {
            return;
        }
        let view: &TileGrid = grid;
        let region = flood_region(view, seed, |pos| {
            view.overlay_color(pos, layer).flatten() == original
        });
        debug!("Overlay fill from {seed}: {} tiles", region.len());
        for pos in region {
            self.record(grid, pos, TileChange::Overlay { from: original, to });
        }
    }

    /// Anchor on the first resolved edge, then cover up to the sample's tile
    fn trace_fence(
        &mut self,
        grid: &mut TileGrid,
        target: Option<EditTarget>,
        tile: IVec2,
        fence_id: u32,
    ) {
        if self.fence_line.is_none()
            && let Some(EditTarget::Fence(anchor)) = target
        {
            self.fence_line = Some(FenceLine::new(anchor));
        }
        let Some(line) = self.fence_line.as_mut() else {
            return;
        };

        let edge = line.edge();
        let owners = line.extend_to(tile, grid);
        for owner in owners {
            self.set_fence(grid, FenceTarget { owner, edge }, edge.encode(fence_id));
        }
    }
}
