use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::constants::MAX_BRUSH_RADIUS;
use crate::editor::{
    ActiveGesture, CellSize, CommandHistory, CurrentTool, EditorTool, Palette, SelectedLayer,
    ToolFamily, ToolMode, DEFAULT_OVERLAY,
};
use crate::map::{MapLayer, TileGrid};
use crate::theme;

use super::resize_dialog::ResizeDialogState;
use super::DialogState;

const FAMILIES: [(ToolFamily, &str, &str); 5] = [
    (ToolFamily::Terrain, "Terrain", "T"),
    (ToolFamily::Object, "Object", "O"),
    (ToolFamily::Fence, "Fence", "F"),
    (ToolFamily::Overlay, "Overlay", "C"),
    (ToolFamily::Label, "Label", "L"),
];

const MODES: [(ToolMode, &str, &str); 6] = [
    (ToolMode::Pencil, "Pencil", "P"),
    (ToolMode::Brush, "Brush", "B"),
    (ToolMode::Eraser, "Eraser", "E"),
    (ToolMode::Fill, "Fill", "G"),
    (ToolMode::Line, "Line", "N"),
    (ToolMode::Picker, "Picker", "I"),
];

/// Main toolbar: tool family, mode, layer and history buttons
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut current_tool: ResMut<CurrentTool>,
    mut selected_layer: ResMut<SelectedLayer>,
    mut history: ResMut<CommandHistory>,
    mut grid: ResMut<TileGrid>,
    active: Res<ActiveGesture>,
    mut resize_dialog: ResMut<ResizeDialogState>,
    dialog_state: Res<DialogState>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let tool = current_tool.tool;
                for (family, name, key) in FAMILIES {
                    let response = ui.add(
                        egui::Button::new(egui::RichText::new(name).strong())
                            .min_size(egui::vec2(0.0, 26.0))
                            .selected(tool.family() == family),
                    );
                    if response.clicked()
                        && let Some(new_tool) = EditorTool::from_parts(family, ToolMode::Pencil)
                    {
                        current_tool.tool = new_tool;
                    }
                    response.on_hover_text(format!("{name} ({key})"));
                }

                ui.separator();

                for (mode, name, key) in MODES {
                    let available = tool.with_mode(mode);
                    let response = ui.add_enabled(
                        available.is_some(),
                        egui::Button::new(name).selected(tool.mode() == mode),
                    );
                    if response.clicked()
                        && let Some(new_tool) = available
                    {
                        current_tool.tool = new_tool;
                    }
                    response.on_hover_text(format!("{name} ({key})"));
                }

                ui.separator();

                ui.label("Layer:");
                egui::ComboBox::from_id_salt("layer_select")
                    .selected_text(selected_layer.layer.display_name())
                    .width(80.0)
                    .show_ui(ui, |ui| {
                        for layer in MapLayer::all() {
                            let is_selected = selected_layer.layer == *layer;
                            if ui
                                .selectable_label(is_selected, layer.display_name())
                                .clicked()
                            {
                                selected_layer.layer = *layer;
                            }
                        }
                    });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // A pending label refers to the current layout
                    let blocked = dialog_state.any_modal_open;
                    if ui
                        .add_enabled(!blocked, egui::Button::new("Resize..."))
                        .clicked()
                    {
                        resize_dialog.open();
                    }

                    let idle = !active.is_active() && !blocked;
                    if ui
                        .add_enabled(idle && history.can_redo(), egui::Button::new("Redo"))
                        .on_hover_text("Ctrl+Y")
                        .clicked()
                    {
                        history.redo(&mut grid);
                    }
                    let undo_hint = match history.peek_undo() {
                        Some(command) => format!("Undo {} (Ctrl+Z)", command.tool().display_name()),
                        None => "Ctrl+Z".to_string(),
                    };
                    if ui
                        .add_enabled(idle && history.can_undo(), egui::Button::new("Undo"))
                        .on_hover_text(undo_hint)
                        .clicked()
                    {
                        history.undo(&mut grid);
                    }
                });
            });
        });
    Ok(())
}

/// Secondary bar with the palette values the active tool uses
pub fn tool_settings_ui(
    mut contexts: EguiContexts,
    current_tool: Res<CurrentTool>,
    mut palette: ResMut<Palette>,
    cell_size: Res<CellSize>,
    grid: Res<TileGrid>,
) -> Result {
    let tool = current_tool.tool;

    egui::TopBottomPanel::top("tool_settings")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 6))
                .fill(theme::ui::PANEL_BACKGROUND),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.label(
                    egui::RichText::new(format!("{}:", tool.display_name()))
                        .color(theme::ui::LABEL_TEXT),
                );

                match tool.family() {
                    ToolFamily::Terrain => {
                        ui.label("Terrain id");
                        ui.add(egui::DragValue::new(&mut palette.terrain).range(0..=u16::MAX));
                    }
                    ToolFamily::Object => {
                        ui.label("Object id");
                        ui.add(egui::DragValue::new(&mut palette.object).range(0..=u16::MAX));
                    }
                    ToolFamily::Fence => {
                        ui.label("Fence id");
                        ui.add(egui::DragValue::new(&mut palette.fence).range(0..=u16::MAX));
                    }
                    ToolFamily::Overlay => {
                        let mut has_tint = palette.overlay_color.is_some();
                        if ui.checkbox(&mut has_tint, "Tint").changed() {
                            palette.overlay_color =
                                has_tint.then_some(DEFAULT_OVERLAY);
                        }
                        if let Some(tint) = palette.overlay_color {
                            let mut color = theme::tint_to_egui(tint);
                            if ui.color_edit_button_srgba(&mut color).changed() {
                                palette.overlay_color = Some(theme::egui_to_tint(color));
                            }
                        }
                    }
                    ToolFamily::Label => {
                        ui.label("Text color");
                        let mut color = theme::tint_to_egui(palette.label_color);
                        if ui.color_edit_button_srgba(&mut color).changed() {
                            palette.label_color = theme::egui_to_tint(color);
                        }
                    }
                }

                if tool.mode() == ToolMode::Brush {
                    ui.add_space(12.0);
                    ui.label("Radius");
                    let mut radius = palette.brush_radius;
                    if ui
                        .add(egui::DragValue::new(&mut radius).range(0..=MAX_BRUSH_RADIUS))
                        .changed()
                    {
                        palette.set_brush_radius(radius);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}x{} tiles, {}px cells",
                            grid.width(),
                            grid.height(),
                            cell_size.pixels()
                        ))
                        .color(theme::ui::HINT_TEXT)
                        .size(11.0),
                    );
                });
            });
        });
    Ok(())
}
