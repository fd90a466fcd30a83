//! Centralized color theme for the application.
//!
//! This module provides all colors used by the map preview and the editor UI.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::map::TintColor;

// ============================================================================
// Grid Colors
// ============================================================================

/// Semi-transparent grey grid lines
pub const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

/// Outline around the map bounds
pub const MAP_BORDER: Color = Color::srgba(0.8, 0.8, 0.8, 0.8);

// ============================================================================
// Tile Content Colors
// ============================================================================

/// Fence segments
pub const FENCE_COLOR: Color = Color::srgb(0.55, 0.35, 0.15);

/// Object markers inside their sub-cell slot
pub const OBJECT_MARKER: Color = Color::srgb(0.2, 0.8, 0.9);

/// Base hues cycled through by terrain id
const TERRAIN_HUES: [Color; 8] = [
    Color::srgb(0.35, 0.65, 0.3),
    Color::srgb(0.75, 0.7, 0.45),
    Color::srgb(0.3, 0.45, 0.8),
    Color::srgb(0.5, 0.5, 0.5),
    Color::srgb(0.45, 0.3, 0.2),
    Color::srgb(0.9, 0.9, 0.95),
    Color::srgb(0.7, 0.3, 0.6),
    Color::srgb(0.9, 0.5, 0.2),
];

/// Preview color for a non-empty terrain id
pub fn terrain_color(terrain: u32) -> Color {
    let index = (terrain.saturating_sub(1) as usize) % TERRAIN_HUES.len();
    TERRAIN_HUES[index]
}

// ============================================================================
// Cursor Colors
// ============================================================================

/// Translucent yellow highlight of the tile under the cursor
pub const HOVER_COLOR: Color = Color::srgba(1.0, 1.0, 0.0, 100.0 / 255.0);

/// Stronger highlight for the sub-cell zone a tool would edit
pub const HOVER_ZONE_COLOR: Color = Color::srgba(1.0, 1.0, 0.0, 0.9);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background (tool settings bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

pub fn tint_to_egui(color: TintColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn egui_to_tint(color: egui::Color32) -> TintColor {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    TintColor::rgba(r, g, b, a)
}
