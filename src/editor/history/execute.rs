//! The single executor every edit kind goes through.

use crate::map::TileLayerData;

use super::edits::TileChange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Write the `to` value (execute / redo)
    Forward,
    /// Write the `from` value (undo)
    Backward,
}

fn pick<T: Clone>(from: &T, to: &T, direction: Direction) -> T {
    match direction {
        Direction::Forward => to.clone(),
        Direction::Backward => from.clone(),
    }
}

/// Write one side of a change into a tile's layer fields
pub fn write_change(data: &mut TileLayerData, change: &TileChange, direction: Direction) {
    match change {
        TileChange::Terrain { from, to } => {
            data.terrain = pick(from, to, direction);
        }
        TileChange::Object { slot, from, to } => {
            *data.object_mut(*slot) = pick(from, to, direction);
        }
        TileChange::Fence { edge, from, to } => {
            *data.fence_mut(*edge) = pick(from, to, direction);
        }
        TileChange::Overlay { from, to } => {
            data.overlay = pick(from, to, direction);
        }
        TileChange::Label { from, to } => {
            data.label = pick(from, to, direction);
        }
    }
}
