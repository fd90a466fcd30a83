//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Width in tiles of a freshly created map
pub const DEFAULT_MAP_WIDTH: u32 = 24;

/// Height in tiles of a freshly created map
pub const DEFAULT_MAP_HEIGHT: u32 = 17;

/// Default on-screen size of one tile, in pixels
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Smallest allowed cell size
pub const MIN_CELL_SIZE: u32 = 4;

/// Largest allowed cell size
pub const MAX_CELL_SIZE: u32 = 128;

/// Cell size increment for zooming in and out
pub const CELL_SIZE_STEP: u32 = 4;

/// Default brush radius in tiles (4-connected steps from the center)
pub const DEFAULT_BRUSH_RADIUS: u32 = 1;

/// Largest brush radius the palette accepts
pub const MAX_BRUSH_RADIUS: u32 = 16;

/// Default number of gestures kept in the undo history
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
