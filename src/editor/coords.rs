//! Pixel to grid mapping.
//!
//! Pixel positions are in map space: origin at the top-left corner of tile
//! (0, 0), y growing downward. A position resolves to a tile index plus,
//! depending on the active tool, a finer sub-cell zone:
//!
//! - Object zone: the cell split into a 3x3 sub-grid, one slot per zone.
//! - Fence zone: the cell split into a 4x4 sub-grid. The middle of each side
//!   selects an edge; corners are dead zones so that diagonal hits never pick
//!   an arbitrary edge.
//!
//! ```text
//!   col 0   1   2   3
//!     +---+---+---+---+
//!   0 | x | top   | x |
//!     +---+---+---+---+
//!   1 |   |       |   |
//!     |lft|       |rgt|   rgt = left edge of the tile to the right
//!   2 |   |       |   |
//!     +---+---+---+---+
//!   3 | x | bottom| x |   bottom = top edge of the tile below
//!     +---+---+---+---+
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{CELL_SIZE_STEP, DEFAULT_CELL_SIZE, MAX_CELL_SIZE, MIN_CELL_SIZE};
use crate::map::{FenceEdge, ObjectSlot, TileGrid};

/// On-screen edge length of one square tile, in pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize(u32);

impl Default for CellSize {
    fn default() -> Self {
        Self(DEFAULT_CELL_SIZE)
    }
}

impl CellSize {
    /// Clamp into the allowed range and snap down onto the step lattice
    pub fn new(pixels: u32) -> Self {
        let clamped = pixels.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let snapped = MIN_CELL_SIZE + (clamped - MIN_CELL_SIZE) / CELL_SIZE_STEP * CELL_SIZE_STEP;
        Self(snapped)
    }

    pub fn pixels(&self) -> u32 {
        self.0
    }

    pub fn as_f32(&self) -> f32 {
        self.0 as f32
    }

    /// Returns false (and leaves the size alone) when already at the maximum
    pub fn zoom_in(&mut self) -> bool {
        if self.0 + CELL_SIZE_STEP > MAX_CELL_SIZE {
            return false;
        }
        self.0 += CELL_SIZE_STEP;
        true
    }

    /// Returns false (and leaves the size alone) when already at the minimum
    pub fn zoom_out(&mut self) -> bool {
        if self.0 < MIN_CELL_SIZE + CELL_SIZE_STEP {
            return false;
        }
        self.0 -= CELL_SIZE_STEP;
        true
    }

    /// Top-left pixel of a tile
    pub fn tile_origin(&self, tile: IVec2) -> Vec2 {
        tile.as_vec2() * self.as_f32()
    }

    /// Center pixel of a tile
    pub fn tile_center(&self, tile: IVec2) -> Vec2 {
        self.tile_origin(tile) + Vec2::splat(self.as_f32() / 2.0)
    }
}

/// Which sub-cell partition a tool resolves pointer positions against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetZone {
    Tile,
    Object,
    Fence,
}

/// An edge addressed through its canonical owner tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FenceTarget {
    pub owner: IVec2,
    pub edge: FenceEdge,
}

/// Fully resolved, in-bounds edit target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Tile(IVec2),
    Object(IVec2, ObjectSlot),
    Fence(FenceTarget),
}

impl EditTarget {
    /// The tile whose fields the target addresses
    pub fn tile(&self) -> IVec2 {
        match self {
            EditTarget::Tile(pos) | EditTarget::Object(pos, _) => *pos,
            EditTarget::Fence(fence) => fence.owner,
        }
    }
}

/// Map pixel for a 2D world position. The map's top-left corner sits at the
/// world origin and world y points up.
pub fn world_to_pixel(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

pub fn pixel_to_world(pixel: Vec2) -> Vec2 {
    Vec2::new(pixel.x, -pixel.y)
}

/// Tile index containing a pixel. Not bounds checked.
pub fn tile_at(pixel: Vec2, cell: CellSize) -> IVec2 {
    let size = cell.as_f32();
    IVec2::new(
        (pixel.x / size).floor() as i32,
        (pixel.y / size).floor() as i32,
    )
}

/// (col, row) of the pixel inside an n x n partition of its cell
fn sub_cell(pixel: Vec2, cell: CellSize, divisions: u32) -> UVec2 {
    let local = pixel - cell.tile_origin(tile_at(pixel, cell));
    let step = cell.as_f32() / divisions as f32;
    let max = divisions as i32 - 1;
    UVec2::new(
        ((local.x / step).floor() as i32).clamp(0, max) as u32,
        ((local.y / step).floor() as i32).clamp(0, max) as u32,
    )
}

/// Object slot under the pixel (3x3 partition)
pub fn object_zone(pixel: Vec2, cell: CellSize) -> ObjectSlot {
    let zone = sub_cell(pixel, cell, 3);
    // Both coordinates are clamped to 0..=2, so the slot always exists
    ObjectSlot::from_row_col(zone.y, zone.x).unwrap_or(ObjectSlot::CENTER)
}

/// Fence edge under the pixel (4x4 partition), `None` in the corner dead zones.
///
/// The owner may lie outside the grid (right/bottom border); callers check bounds.
pub fn fence_zone(pixel: Vec2, cell: CellSize) -> Option<FenceTarget> {
    let tile = tile_at(pixel, cell);
    let zone = sub_cell(pixel, cell, 4);
    match (zone.x, zone.y) {
        (0, 1 | 2) => Some(FenceTarget {
            owner: tile,
            edge: FenceEdge::Left,
        }),
        (1 | 2, 0) => Some(FenceTarget {
            owner: tile,
            edge: FenceEdge::Top,
        }),
        (1 | 2, 3) => Some(FenceTarget {
            owner: tile + IVec2::Y,
            edge: FenceEdge::Top,
        }),
        (3, 1 | 2) => Some(FenceTarget {
            owner: tile + IVec2::X,
            edge: FenceEdge::Left,
        }),
        _ => None,
    }
}

/// Resolve a pointer position against the grid.
///
/// Yields `None` when the pointer's tile or the zone's owner tile is out of
/// bounds, or when the pointer sits in a fence dead zone.
pub fn resolve_target(
    grid: &TileGrid,
    pixel: Vec2,
    cell: CellSize,
    zone: TargetZone,
) -> Option<EditTarget> {
    let tile = tile_at(pixel, cell);
    if !grid.in_bounds(tile) {
        return None;
    }
    match zone {
        TargetZone::Tile => Some(EditTarget::Tile(tile)),
        TargetZone::Object => Some(EditTarget::Object(tile, object_zone(pixel, cell))),
        TargetZone::Fence => {
            let target = fence_zone(pixel, cell)?;
            grid.in_bounds(target.owner).then_some(EditTarget::Fence(target))
        }
    }
}
