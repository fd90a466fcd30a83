//! Label text capture.
//!
//! A label gesture ends with a [`LabelRequest`]; this popup collects the text
//! next to the tile and commits it as one undoable edit.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::map::TileGrid;
use crate::theme;

use super::camera::EditorCamera;
use super::coords::{pixel_to_world, CellSize};
use super::gesture::LabelRequest;
use super::history::CommandHistory;
use super::palette::Palette;

#[derive(Resource, Default)]
pub struct LabelPrompt {
    request: Option<LabelRequest>,
    text_buffer: String,
}

impl LabelPrompt {
    /// Show the popup for a tile, pre-filled with its current label
    pub fn open(&mut self, request: LabelRequest, current: Option<String>) {
        self.request = Some(request);
        self.text_buffer = current.unwrap_or_default();
    }

    pub fn is_open(&self) -> bool {
        self.request.is_some()
    }

    pub fn request(&self) -> Option<LabelRequest> {
        self.request
    }

    pub fn close(&mut self) {
        self.request = None;
        self.text_buffer.clear();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn label_prompt_ui(
    mut contexts: EguiContexts,
    mut prompt: ResMut<LabelPrompt>,
    mut grid: ResMut<TileGrid>,
    mut history: ResMut<CommandHistory>,
    mut palette: ResMut<Palette>,
    cell_size: Res<CellSize>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Some(request) = prompt.request() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        prompt.close();
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // Anchor the popup at the tile's top-right corner
    let corner = cell_size.tile_origin(request.pos) + Vec2::new(cell_size.as_f32(), 0.0);
    let world_pos = pixel_to_world(corner);
    let Ok(screen_pos) = camera.world_to_viewport(camera_transform, world_pos.extend(0.0)) else {
        return;
    };

    let mut should_commit = false;
    let mut color = theme::tint_to_egui(palette.label_color);

    egui::Area::new(egui::Id::new("tile_label_input"))
        .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
        .pivot(egui::Align2::LEFT_TOP)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(format!(
                    "Label ({}, {}) on {}",
                    request.pos.x,
                    request.pos.y,
                    request.layer.display_name()
                ));
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut prompt.text_buffer)
                            .hint_text("Label text...")
                            .desired_width(180.0),
                    );
                    if !response.has_focus() && !response.lost_focus() {
                        response.request_focus();
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        should_commit = true;
                    }
                    ui.color_edit_button_srgba(&mut color);
                });
                ui.label(
                    egui::RichText::new("Enter to confirm, Esc to cancel, empty to clear")
                        .small()
                        .color(theme::ui::HINT_TEXT),
                );
            });
        });

    let picked = theme::egui_to_tint(color);
    if picked != palette.label_color {
        palette.label_color = picked;
    }

    if should_commit {
        let text = std::mem::take(&mut prompt.text_buffer);
        if request.commit(&mut grid, &mut history, &text, palette.label_color) {
            debug!("Label set at {} on {} layer", request.pos, request.layer.display_name());
        }
        prompt.close();
    }
}
