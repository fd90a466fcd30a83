//! Atomic, reversible tile edits.

use bevy::prelude::*;

use crate::map::{FenceEdge, MapLayer, ObjectSlot, TileGrid, TileLabel, TintColor};

use super::execute::{write_change, Direction};

/// One field write, with the value before and after
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileChange {
    Terrain { from: u32, to: u32 },
    Object { slot: ObjectSlot, from: u32, to: u32 },
    Fence { edge: FenceEdge, from: u32, to: u32 },
    Overlay { from: Option<TintColor>, to: Option<TintColor> },
    Label { from: Option<TileLabel>, to: Option<TileLabel> },
}

impl TileChange {
    /// A change that would leave the field as it is
    pub fn is_noop(&self) -> bool {
        match self {
            TileChange::Terrain { from, to } => from == to,
            TileChange::Object { from, to, .. } => from == to,
            TileChange::Fence { from, to, .. } => from == to,
            TileChange::Overlay { from, to } => from == to,
            TileChange::Label { from, to } => from == to,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Reverted,
    Applied,
}

/// A [`TileChange`] bound to a tile and layer
#[derive(Clone, Debug)]
pub struct TileEdit {
    pos: IVec2,
    layer: MapLayer,
    change: TileChange,
    /// The tile did not exist before this edit; undoing removes it again
    creates_tile: bool,
    state: EditState,
}

impl TileEdit {
    /// Build an edit against the grid's current contents. Not applied yet.
    pub fn new(grid: &TileGrid, pos: IVec2, layer: MapLayer, change: TileChange) -> Self {
        Self {
            pos,
            layer,
            change,
            creates_tile: grid.tile(pos).is_none(),
            state: EditState::Reverted,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Write the new value. No-op when already applied.
    pub fn execute(&mut self, grid: &mut TileGrid) {
        if self.state == EditState::Applied {
            return;
        }
        let Some(tile) = grid.get_or_create(self.pos) else {
            warn!("Dropping edit outside the map at {}", self.pos);
            return;
        };
        write_change(tile.layer_mut(self.layer), &self.change, Direction::Forward);
        self.state = EditState::Applied;
    }

    pub fn redo(&mut self, grid: &mut TileGrid) {
        self.execute(grid);
    }

    /// Restore the old value. No-op when already reverted.
    pub fn undo(&mut self, grid: &mut TileGrid) {
        if self.state == EditState::Reverted {
            return;
        }
        self.state = EditState::Reverted;

        let Some(tile) = grid.tile_mut(self.pos) else {
            return;
        };
        write_change(tile.layer_mut(self.layer), &self.change, Direction::Backward);

        if self.creates_tile && tile.is_empty() {
            grid.remove(self.pos);
        }
    }
}
