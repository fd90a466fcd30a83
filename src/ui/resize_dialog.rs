use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::map::{ResizeMapRequest, TileGrid};

/// Largest margin the dialog offers per side
const MAX_MARGIN: i32 = 256;

/// State for the resize map dialog
#[derive(Resource, Default)]
pub struct ResizeDialogState {
    pub is_open: bool,
    /// Signed margins: positive grows the map on that side, negative crops it
    pub north: i32,
    pub east: i32,
    pub south: i32,
    pub west: i32,
}

impl ResizeDialogState {
    pub fn open(&mut self) {
        *self = Self {
            is_open: true,
            ..default()
        };
    }

    pub fn request(&self) -> ResizeMapRequest {
        ResizeMapRequest {
            north: self.north,
            east: self.east,
            south: self.south,
            west: self.west,
        }
    }

    /// Size the map would have after applying the margins
    pub fn resulting_size(&self, grid: &TileGrid) -> IVec2 {
        IVec2::new(
            grid.width() as i32 + self.east + self.west,
            grid.height() as i32 + self.north + self.south,
        )
    }
}

fn margin_row(ui: &mut egui::Ui, label: &str, value: &mut i32) {
    ui.label(label);
    ui.add(egui::DragValue::new(value).range(-MAX_MARGIN..=MAX_MARGIN));
    ui.end_row();
}

/// Renders the resize dialog
pub fn resize_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog_state: ResMut<ResizeDialogState>,
    grid: Res<TileGrid>,
    mut resize_events: MessageWriter<ResizeMapRequest>,
) -> Result {
    if !dialog_state.is_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut should_apply = false;

    egui::Window::new("Resize Map")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!("Current size: {}x{}", grid.width(), grid.height()));
            ui.add_space(8.0);

            egui::Grid::new("resize_margins")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    margin_row(ui, "North", &mut dialog_state.north);
                    margin_row(ui, "East", &mut dialog_state.east);
                    margin_row(ui, "South", &mut dialog_state.south);
                    margin_row(ui, "West", &mut dialog_state.west);
                });

            ui.add_space(8.0);

            let size = dialog_state.resulting_size(&grid);
            let valid = size.x >= 1 && size.y >= 1;
            if valid {
                ui.label(format!("New size: {}x{}", size.x, size.y));
            } else {
                ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Map would be empty");
            }

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(valid, egui::Button::new("Resize")).clicked() {
                    should_apply = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if should_apply {
        resize_events.write(dialog_state.request());
        should_close = true;
    }

    if should_close {
        dialog_state.is_open = false;
    }

    Ok(())
}
