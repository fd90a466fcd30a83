//! Brush footprint.

use bevy::prelude::*;

use crate::map::TileGrid;

/// Tiles within `radius` 4-connected steps of `center`, clipped to the grid.
///
/// Radius 0 is the center alone, radius 1 adds the four direct neighbors.
pub fn brush_footprint(grid: &TileGrid, center: IVec2, radius: u32) -> Vec<IVec2> {
    let r = radius.min(i32::MAX as u32) as i32;
    let mut tiles = Vec::new();
    for dy in -r..=r {
        let span = r - dy.abs();
        for dx in -span..=span {
            let pos = center + IVec2::new(dx, dy);
            if grid.in_bounds(pos) {
                tiles.push(pos);
            }
        }
    }
    tiles
}
