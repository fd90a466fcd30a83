//! Straight fence runs traced from an anchor edge.
//!
//! Top edges run horizontally, so a line anchored on one extends along x in
//! the anchor's row. Left edges run vertically and extend along y in the
//! anchor's column.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::editor::coords::FenceTarget;
use crate::map::{FenceEdge, TileGrid};

#[derive(Debug, Clone)]
pub struct FenceLine {
    anchor: FenceTarget,
    covered: HashSet<IVec2>,
}

impl FenceLine {
    pub fn new(anchor: FenceTarget) -> Self {
        Self {
            anchor,
            covered: HashSet::new(),
        }
    }

    pub fn edge(&self) -> FenceEdge {
        self.anchor.edge
    }

    /// Extend coverage from the anchor to `tile` along the line's axis.
    ///
    /// Returns the owners that were not covered before, in order from the
    /// anchor outward. Owners outside the grid are skipped.
    pub fn extend_to(&mut self, tile: IVec2, grid: &TileGrid) -> Vec<IVec2> {
        let anchor = self.anchor.owner;
        let (from, to, len) = match self.anchor.edge {
            FenceEdge::Top => (anchor.x, tile.x, grid.width()),
            FenceEdge::Left => (anchor.y, tile.y, grid.height()),
        };
        // Nothing past the map edge can be covered
        let last = len.saturating_sub(1) as i32;
        let to = to.clamp(0, last);
        let from = from.clamp(0, last);
        let step = if to >= from { 1 } else { -1 };

        let mut added = Vec::new();
        let mut i = from;
        loop {
            let owner = match self.anchor.edge {
                FenceEdge::Top => IVec2::new(i, anchor.y),
                FenceEdge::Left => IVec2::new(anchor.x, i),
            };
            if grid.in_bounds(owner) && self.covered.insert(owner) {
                added.push(owner);
            }
            if i == to {
                break;
            }
            i += step;
        }
        added
    }
}
