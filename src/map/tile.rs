//! Per-cell layered state.
//!
//! A [`Tile`] owns one [`TileLayerData`] per [`MapLayer`]. Fence edges are stored
//! only on the top and left side of a tile: the right edge of a tile is the left
//! edge of its eastern neighbor, and the bottom edge is the top edge of its
//! southern neighbor, so every physical edge has exactly one owner.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::MapLayer;

/// Terrain/object/fence id meaning "nothing here"
pub const EMPTY_ID: u32 = 0;

/// Number of object slots per tile (3x3 sub-grid, row-major)
pub const OBJECT_SLOTS: usize = 9;

/// 8-bit RGBA tint. Compared exactly, which the overlay fill relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TintColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl From<TintColor> for Color {
    fn from(c: TintColor) -> Self {
        Color::srgba_u8(c.r, c.g, c.b, c.a)
    }
}

/// Text label drawn on a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLabel {
    pub text: String,
    pub color: TintColor,
}

/// The two canonically owned edges of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FenceEdge {
    /// Runs horizontally along the top of the tile
    Top,
    /// Runs vertically along the left of the tile
    Left,
}

impl FenceEdge {
    /// Stored value for a fence id placed on this edge.
    ///
    /// Left edges are offset by one so that the palette's first fence id is
    /// still distinguishable from the empty sentinel.
    pub fn encode(&self, fence_id: u32) -> u32 {
        match self {
            FenceEdge::Top => fence_id,
            FenceEdge::Left => fence_id.saturating_add(1),
        }
    }

    /// Inverse of [`FenceEdge::encode`], clamped at zero
    pub fn decode(&self, stored: u32) -> u32 {
        match self {
            FenceEdge::Top => stored,
            FenceEdge::Left => stored.saturating_sub(1),
        }
    }
}

/// Index into a tile's 3x3 object sub-grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectSlot(u8);

impl ObjectSlot {
    pub const CENTER: ObjectSlot = ObjectSlot(4);

    pub fn new(index: usize) -> Option<Self> {
        (index < OBJECT_SLOTS).then_some(Self(index as u8))
    }

    /// Slot for a (row, col) position in the sub-grid; both must be in 0..3
    pub fn from_row_col(row: u32, col: u32) -> Option<Self> {
        if row > 2 || col > 2 {
            return None;
        }
        Self::new((row * 3 + col) as usize)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Field values of one tile on one layer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileLayerData {
    pub terrain: u32,
    pub objects: [u32; OBJECT_SLOTS],
    pub fence_top: u32,
    pub fence_left: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<TintColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TileLabel>,
}

impl TileLayerData {
    pub fn object(&self, slot: ObjectSlot) -> u32 {
        self.objects[slot.index()]
    }

    pub fn object_mut(&mut self, slot: ObjectSlot) -> &mut u32 {
        &mut self.objects[slot.index()]
    }

    pub fn fence(&self, edge: FenceEdge) -> u32 {
        match edge {
            FenceEdge::Top => self.fence_top,
            FenceEdge::Left => self.fence_left,
        }
    }

    pub fn fence_mut(&mut self, edge: FenceEdge) -> &mut u32 {
        match edge {
            FenceEdge::Top => &mut self.fence_top,
            FenceEdge::Left => &mut self.fence_left,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single grid cell. Its position only changes when the grid is resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pos: IVec2,
    surface: TileLayerData,
    cave: TileLayerData,
}

impl Tile {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            surface: TileLayerData::default(),
            cave: TileLayerData::default(),
        }
    }

    pub fn pos(&self) -> IVec2 {
        self.pos
    }

    pub fn layer(&self, layer: MapLayer) -> &TileLayerData {
        match layer {
            MapLayer::Surface => &self.surface,
            MapLayer::Cave => &self.cave,
        }
    }

    pub fn layer_mut(&mut self, layer: MapLayer) -> &mut TileLayerData {
        match layer {
            MapLayer::Surface => &mut self.surface,
            MapLayer::Cave => &mut self.cave,
        }
    }

    /// Move this tile to a new position, keeping all field values
    pub(super) fn relocated(self, pos: IVec2) -> Self {
        Self { pos, ..self }
    }

    pub fn is_empty(&self) -> bool {
        self.surface.is_empty() && self.cave.is_empty()
    }
}
