//! Pointer bridge: turns left-button press, drag and release into gesture calls.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::map::TileGrid;

use super::coords::CellSize;
use super::gesture::{Gesture, GestureContext, GestureOutcome};
use super::history::CommandHistory;
use super::label::LabelPrompt;
use super::palette::Palette;
use super::params::{is_cursor_over_ui, CameraParams};
use super::tools::{CurrentTool, SelectedLayer};

/// The gesture in progress, if the primary button is held
#[derive(Resource, Default)]
pub struct ActiveGesture {
    gesture: Option<Gesture>,
    last_pixel: Option<Vec2>,
}

impl ActiveGesture {
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn take(&mut self) -> Option<Gesture> {
        self.last_pixel = None;
        self.gesture.take()
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    current_tool: Res<CurrentTool>,
    selected_layer: Res<SelectedLayer>,
    cell_size: Res<CellSize>,
    mut grid: ResMut<TileGrid>,
    mut palette: ResMut<Palette>,
    mut history: ResMut<CommandHistory>,
    mut active: ResMut<ActiveGesture>,
    mut label_prompt: ResMut<LabelPrompt>,
    mut contexts: EguiContexts,
) {
    let pixel = camera.cursor_pixel_pos();

    if mouse_button.just_pressed(MouseButton::Left) && !active.is_active() {
        // Presses that start on the UI belong to the UI
        if is_cursor_over_ui(&mut contexts) || label_prompt.is_open() {
            return;
        }
        let Some(pixel) = pixel else {
            return;
        };

        let mut ctx = GestureContext {
            grid: &mut grid,
            palette: &mut palette,
            cell_size: *cell_size,
        };
        let gesture = Gesture::begin(current_tool.tool, selected_layer.layer, &mut ctx, pixel);
        active.gesture = Some(gesture);
        active.last_pixel = Some(pixel);
        return;
    }

    if !active.is_active() {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) {
        // Only feed samples that moved; a held button repeats every frame
        if let Some(pixel) = pixel
            && active.last_pixel != Some(pixel)
        {
            let mut ctx = GestureContext {
                grid: &mut grid,
                palette: &mut palette,
                cell_size: *cell_size,
            };
            active.last_pixel = Some(pixel);
            if let Some(gesture) = active.gesture.as_mut() {
                gesture.extend(&mut ctx, pixel);
            }
        }
        return;
    }

    // Released (or the press was lost, e.g. window focus change)
    let Some(gesture) = active.take() else {
        return;
    };
    let tool = gesture.tool();
    let layer = gesture.layer();
    match gesture.finish(&mut grid, &mut history) {
        GestureOutcome::Committed { edits } => {
            debug!(
                "{} on {} layer: {} edits committed",
                tool.display_name(),
                layer.display_name(),
                edits
            );
        }
        GestureOutcome::Nothing => {}
        GestureOutcome::LabelRequested(request) => {
            let current = grid
                .label(request.pos, request.layer)
                .flatten()
                .map(|label| label.text.clone());
            label_prompt.open(request, current);
        }
    }
}
