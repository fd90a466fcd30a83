//! 4-connected flood fill over the tile grid.

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::map::TileGrid;

/// Collect the connected region around `seed` whose tiles satisfy `matches`.
///
/// Breadth-first, each in-bounds tile is examined at most once. The seed is
/// part of the region when it is in bounds and matches. The predicate is
/// evaluated against the grid as it is now, so callers must collect the full
/// region before writing to any of it.
pub fn flood_region<F>(grid: &TileGrid, seed: IVec2, matches: F) -> Vec<IVec2>
where
    F: Fn(IVec2) -> bool,
{
    let mut region = Vec::new();
    if !grid.in_bounds(seed) || !matches(seed) {
        return region;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(pos) = queue.pop_front() {
        region.push(pos);

        for offset in [IVec2::NEG_X, IVec2::X, IVec2::NEG_Y, IVec2::Y] {
            let next = pos + offset;
            if !grid.in_bounds(next) || !visited.insert(next) {
                continue;
            }
            if matches(next) {
                queue.push_back(next);
            }
        }
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapLayer;

    fn terrain_at(grid: &TileGrid, pos: IVec2) -> u32 {
        grid.terrain(pos, MapLayer::Surface).unwrap_or(0)
    }

    #[test]
    fn test_fills_whole_empty_grid() {
        let grid = TileGrid::new(6, 4).unwrap();
        let region = flood_region(&grid, IVec2::new(2, 2), |p| terrain_at(&grid, p) == 0);
        assert_eq!(region.len(), 24);
    }

    #[test]
    fn test_stops_at_walls() {
        let mut grid = TileGrid::new(5, 5).unwrap();
        // Vertical wall at x = 2
        for y in 0..5 {
            grid.get_or_create(IVec2::new(2, y))
                .unwrap()
                .layer_mut(MapLayer::Surface)
                .terrain = 9;
        }
        let region = flood_region(&grid, IVec2::new(0, 0), |p| terrain_at(&grid, p) == 0);
        assert_eq!(region.len(), 10);
        assert!(region.iter().all(|p| p.x < 2));
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        for pos in [IVec2::new(1, 0), IVec2::new(0, 1)] {
            grid.get_or_create(pos)
                .unwrap()
                .layer_mut(MapLayer::Surface)
                .terrain = 1;
        }
        let region = flood_region(&grid, IVec2::new(0, 0), |p| terrain_at(&grid, p) == 0);
        assert_eq!(region, vec![IVec2::new(0, 0)]);
    }

    #[test]
    fn test_out_of_bounds_seed() {
        let grid = TileGrid::new(3, 3).unwrap();
        assert!(flood_region(&grid, IVec2::new(3, 0), |_| true).is_empty());
    }
}
