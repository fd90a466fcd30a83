//! The tile grid: bounds, lazily materialized tiles and resizing.
//!
//! Reads never create tiles. Only the edit path goes through
//! [`TileGrid::get_or_create`], so the grid stays sparse until something is
//! actually painted.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{FenceEdge, MapError, MapLayer, ObjectSlot, Tile, TileLabel, TileLayerData, TintColor};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: HashMap<IVec2, Tile>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_MAP_WIDTH,
            height: crate::constants::DEFAULT_MAP_HEIGHT,
            tiles: HashMap::new(),
        }
    }
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            width,
            height,
            tiles: HashMap::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Look up a tile without creating it
    pub fn tile(&self, pos: IVec2) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    /// Mutable access to an existing tile
    pub fn tile_mut(&mut self, pos: IVec2) -> Option<&mut Tile> {
        self.tiles.get_mut(&pos)
    }

    /// Fetch the tile at `pos`, inserting a default one if it does not exist yet.
    ///
    /// Returns `None` for out-of-bounds positions.
    pub fn get_or_create(&mut self, pos: IVec2) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles.entry(pos).or_insert_with(|| Tile::new(pos)))
    }

    /// Drop a materialized tile. Used when undoing the edit that created it.
    pub fn remove(&mut self, pos: IVec2) -> Option<Tile> {
        self.tiles.remove(&pos)
    }

    /// Number of materialized tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn layer_data(&self, pos: IVec2, layer: MapLayer) -> Option<&TileLayerData> {
        self.tile(pos).map(|t| t.layer(layer))
    }

    pub fn terrain(&self, pos: IVec2, layer: MapLayer) -> Option<u32> {
        self.layer_data(pos, layer).map(|d| d.terrain)
    }

    pub fn object(&self, pos: IVec2, layer: MapLayer, slot: ObjectSlot) -> Option<u32> {
        self.layer_data(pos, layer).map(|d| d.object(slot))
    }

    pub fn fence_edge(&self, pos: IVec2, layer: MapLayer, edge: FenceEdge) -> Option<u32> {
        self.layer_data(pos, layer).map(|d| d.fence(edge))
    }

    /// Outer `None` = no tile, inner `None` = tile without tint
    pub fn overlay_color(&self, pos: IVec2, layer: MapLayer) -> Option<Option<TintColor>> {
        self.layer_data(pos, layer).map(|d| d.overlay)
    }

    /// Outer `None` = no tile, inner `None` = tile without label
    pub fn label(&self, pos: IVec2, layer: MapLayer) -> Option<Option<&TileLabel>> {
        self.layer_data(pos, layer).map(|d| d.label.as_ref())
    }

    /// Grow or shrink the grid by signed margins on each side.
    ///
    /// Surviving tiles move by `(west, north)`; tiles that end up outside the
    /// new bounds are discarded. Returns the new `(width, height)`.
    pub fn resize(
        &mut self,
        north: i32,
        east: i32,
        south: i32,
        west: i32,
    ) -> Result<UVec2, MapError> {
        let new_width = self.width as i64 + east as i64 + west as i64;
        let new_height = self.height as i64 + north as i64 + south as i64;

        if new_width <= 0
            || new_height <= 0
            || new_width > i32::MAX as i64
            || new_height > i32::MAX as i64
        {
            return Err(MapError::InvalidDimension {
                width: new_width,
                height: new_height,
            });
        }

        self.width = new_width as u32;
        self.height = new_height as u32;

        let offset = IVec2::new(west, north);
        let old_tiles = std::mem::take(&mut self.tiles);
        for (pos, tile) in old_tiles {
            let new_pos = pos + offset;
            if self.in_bounds(new_pos) {
                self.tiles.insert(new_pos, tile.relocated(new_pos));
            }
        }

        Ok(self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(grid: &mut TileGrid, x: i32, y: i32, terrain: u32) {
        let tile = grid.get_or_create(IVec2::new(x, y)).unwrap();
        tile.layer_mut(MapLayer::Surface).terrain = terrain;
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(TileGrid::new(0, 5).is_err());
        assert!(TileGrid::new(5, 0).is_err());
        assert!(TileGrid::new(1, 1).is_ok());
    }

    #[test]
    fn test_default_grid_size() {
        let grid = TileGrid::default();
        assert_eq!(grid.width(), 24);
        assert_eq!(grid.height(), 17);
        assert_eq!(grid.tile_count(), 0);
    }

    #[test]
    fn test_reads_do_not_materialize() {
        let grid = TileGrid::new(4, 4).unwrap();
        assert_eq!(grid.terrain(IVec2::new(1, 1), MapLayer::Surface), None);
        assert_eq!(grid.overlay_color(IVec2::new(1, 1), MapLayer::Cave), None);
        assert_eq!(grid.tile_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_reads_are_absent() {
        let grid = TileGrid::new(4, 4).unwrap();
        assert!(grid.tile(IVec2::new(-1, 0)).is_none());
        assert!(grid.tile(IVec2::new(4, 0)).is_none());
        assert!(grid.label(IVec2::new(0, 4), MapLayer::Surface).is_none());
    }

    #[test]
    fn test_get_or_create() {
        let mut grid = TileGrid::new(4, 4).unwrap();
        assert!(grid.get_or_create(IVec2::new(4, 0)).is_none());
        assert!(grid.get_or_create(IVec2::new(0, -1)).is_none());

        let tile = grid.get_or_create(IVec2::new(2, 3)).unwrap();
        assert_eq!(tile.pos(), IVec2::new(2, 3));
        assert_eq!(grid.tile_count(), 1);

        // Second call returns the same tile
        grid.get_or_create(IVec2::new(2, 3)).unwrap();
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.terrain(IVec2::new(2, 3), MapLayer::Surface), Some(0));
        assert_eq!(grid.overlay_color(IVec2::new(2, 3), MapLayer::Surface), Some(None));
    }

    #[test]
    fn test_resize_grows_and_relocates() {
        let mut grid = TileGrid::new(10, 10).unwrap();
        paint(&mut grid, 3, 4, 7);
        grid.get_or_create(IVec2::new(9, 9))
            .unwrap()
            .layer_mut(MapLayer::Cave)
            .fence_left = 5;

        let size = grid.resize(1, 0, 0, 2).unwrap();
        assert_eq!(size, UVec2::new(12, 11));
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 11);

        assert_eq!(grid.terrain(IVec2::new(5, 5), MapLayer::Surface), Some(7));
        assert_eq!(grid.tile(IVec2::new(5, 5)).unwrap().pos(), IVec2::new(5, 5));
        assert_eq!(
            grid.fence_edge(IVec2::new(11, 10), MapLayer::Cave, FenceEdge::Left),
            Some(5)
        );
        assert!(grid.tile(IVec2::new(3, 4)).is_none());
    }

    #[test]
    fn test_resize_shrink_discards_outside_tiles() {
        let mut grid = TileGrid::new(10, 10).unwrap();
        paint(&mut grid, 0, 0, 1);
        paint(&mut grid, 5, 5, 2);
        paint(&mut grid, 9, 9, 3);

        // Cut two columns from the west and one row from the south
        let size = grid.resize(0, 0, -1, -2).unwrap();
        assert_eq!(size, UVec2::new(8, 9));
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.terrain(IVec2::new(3, 5), MapLayer::Surface), Some(2));
    }

    #[test]
    fn test_resize_rejects_non_positive_dimensions() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        paint(&mut grid, 1, 1, 4);
        let before = grid.clone();

        let err = grid.resize(0, -2, 0, -1).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidDimension {
                width: 0,
                height: 3
            }
        );
        assert_eq!(grid, before);

        assert!(grid.resize(-5, 0, 0, 0).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_remove_tile() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        paint(&mut grid, 1, 1, 4);
        assert!(grid.remove(IVec2::new(1, 1)).is_some());
        assert!(grid.tile(IVec2::new(1, 1)).is_none());
        assert!(grid.remove(IVec2::new(1, 1)).is_none());
    }
}
