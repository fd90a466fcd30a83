//! The active selection: what the painting tools write and the pickers read into.

use bevy::prelude::*;

use crate::constants::{DEFAULT_BRUSH_RADIUS, MAX_BRUSH_RADIUS};
use crate::map::TintColor;

/// Default overlay tint (translucent yellow)
pub const DEFAULT_OVERLAY: TintColor = TintColor::rgba(255, 255, 0, 100);

/// Default label text color
pub const DEFAULT_LABEL_COLOR: TintColor = TintColor::rgb(255, 255, 255);

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub terrain: u32,
    pub object: u32,
    pub fence: u32,
    /// `None` paints "no tint", same as the overlay eraser
    pub overlay_color: Option<TintColor>,
    pub label_color: TintColor,
    /// Brush reach in 4-connected steps from the center tile
    pub brush_radius: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            terrain: 1,
            object: 1,
            fence: 1,
            overlay_color: Some(DEFAULT_OVERLAY),
            label_color: DEFAULT_LABEL_COLOR,
            brush_radius: DEFAULT_BRUSH_RADIUS,
        }
    }
}

impl Palette {
    pub fn set_brush_radius(&mut self, radius: u32) {
        self.brush_radius = radius.min(MAX_BRUSH_RADIUS);
    }

    pub fn grow_brush(&mut self) {
        self.set_brush_radius(self.brush_radius.saturating_add(1));
    }

    pub fn shrink_brush(&mut self) {
        self.set_brush_radius(self.brush_radius.saturating_sub(1));
    }
}

/// Keyboard shortcuts for the brush radius ([ and ])
pub fn handle_palette_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut palette: ResMut<Palette>) {
    if keyboard.just_pressed(KeyCode::BracketRight) {
        palette.grow_brush();
        debug!("Brush radius {}", palette.brush_radius);
    } else if keyboard.just_pressed(KeyCode::BracketLeft) {
        palette.shrink_brush();
        debug!("Brush radius {}", palette.brush_radius);
    }
}
