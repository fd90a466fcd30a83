use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::map::MapLayer;

use super::coords::{CellSize, TargetZone};

/// What part of the tile a tool edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    Terrain,
    Object,
    Fence,
    Overlay,
    Label,
}

/// How a tool edits its family's field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolMode {
    Pencil,
    Brush,
    Eraser,
    Fill,
    Line,
    Picker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorTool {
    #[default]
    TerrainPencil,
    TerrainBrush,
    TerrainEraser,
    TerrainFill,
    TerrainPicker,
    ObjectPencil,
    ObjectEraser,
    ObjectPicker,
    FencePencil,
    FenceLine,
    FenceEraser,
    FencePicker,
    OverlayPencil,
    OverlayBrush,
    OverlayEraser,
    OverlayFill,
    OverlayPicker,
    Label,
}

impl EditorTool {
    pub fn all() -> &'static [EditorTool] {
        &[
            EditorTool::TerrainPencil,
            EditorTool::TerrainBrush,
            EditorTool::TerrainEraser,
            EditorTool::TerrainFill,
            EditorTool::TerrainPicker,
            EditorTool::ObjectPencil,
            EditorTool::ObjectEraser,
            EditorTool::ObjectPicker,
            EditorTool::FencePencil,
            EditorTool::FenceLine,
            EditorTool::FenceEraser,
            EditorTool::FencePicker,
            EditorTool::OverlayPencil,
            EditorTool::OverlayBrush,
            EditorTool::OverlayEraser,
            EditorTool::OverlayFill,
            EditorTool::OverlayPicker,
            EditorTool::Label,
        ]
    }

    pub fn family(&self) -> ToolFamily {
        match self {
            EditorTool::TerrainPencil
            | EditorTool::TerrainBrush
            | EditorTool::TerrainEraser
            | EditorTool::TerrainFill
            | EditorTool::TerrainPicker => ToolFamily::Terrain,
            EditorTool::ObjectPencil | EditorTool::ObjectEraser | EditorTool::ObjectPicker => {
                ToolFamily::Object
            }
            EditorTool::FencePencil
            | EditorTool::FenceLine
            | EditorTool::FenceEraser
            | EditorTool::FencePicker => ToolFamily::Fence,
            EditorTool::OverlayPencil
            | EditorTool::OverlayBrush
            | EditorTool::OverlayEraser
            | EditorTool::OverlayFill
            | EditorTool::OverlayPicker => ToolFamily::Overlay,
            EditorTool::Label => ToolFamily::Label,
        }
    }

    pub fn mode(&self) -> ToolMode {
        match self {
            EditorTool::TerrainPencil
            | EditorTool::ObjectPencil
            | EditorTool::FencePencil
            | EditorTool::OverlayPencil
            | EditorTool::Label => ToolMode::Pencil,
            EditorTool::TerrainBrush | EditorTool::OverlayBrush => ToolMode::Brush,
            EditorTool::TerrainEraser
            | EditorTool::ObjectEraser
            | EditorTool::FenceEraser
            | EditorTool::OverlayEraser => ToolMode::Eraser,
            EditorTool::TerrainFill | EditorTool::OverlayFill => ToolMode::Fill,
            EditorTool::FenceLine => ToolMode::Line,
            EditorTool::TerrainPicker
            | EditorTool::ObjectPicker
            | EditorTool::FencePicker
            | EditorTool::OverlayPicker => ToolMode::Picker,
        }
    }

    /// The tool with the given family and mode, if that combination exists
    pub fn from_parts(family: ToolFamily, mode: ToolMode) -> Option<EditorTool> {
        EditorTool::all()
            .iter()
            .copied()
            .find(|tool| tool.family() == family && tool.mode() == mode)
    }

    /// Same family, different mode. Falls back to `None` when unsupported.
    pub fn with_mode(&self, mode: ToolMode) -> Option<EditorTool> {
        EditorTool::from_parts(self.family(), mode)
    }

    pub fn target_zone(&self) -> TargetZone {
        match self.family() {
            ToolFamily::Object => TargetZone::Object,
            ToolFamily::Fence => TargetZone::Fence,
            ToolFamily::Terrain | ToolFamily::Overlay | ToolFamily::Label => TargetZone::Tile,
        }
    }

    pub fn is_picker(&self) -> bool {
        self.mode() == ToolMode::Picker
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EditorTool::TerrainPencil => "Terrain Pencil",
            EditorTool::TerrainBrush => "Terrain Brush",
            EditorTool::TerrainEraser => "Terrain Eraser",
            EditorTool::TerrainFill => "Terrain Fill",
            EditorTool::TerrainPicker => "Terrain Picker",
            EditorTool::ObjectPencil => "Object Pencil",
            EditorTool::ObjectEraser => "Object Eraser",
            EditorTool::ObjectPicker => "Object Picker",
            EditorTool::FencePencil => "Fence Pencil",
            EditorTool::FenceLine => "Fence Line",
            EditorTool::FenceEraser => "Fence Eraser",
            EditorTool::FencePicker => "Fence Picker",
            EditorTool::OverlayPencil => "Overlay Pencil",
            EditorTool::OverlayBrush => "Overlay Brush",
            EditorTool::OverlayEraser => "Overlay Eraser",
            EditorTool::OverlayFill => "Overlay Fill",
            EditorTool::OverlayPicker => "Overlay Picker",
            EditorTool::Label => "Label",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        if self.is_picker() {
            return CursorIcon::System(SystemCursorIcon::Cell);
        }
        match self.mode() {
            ToolMode::Fill => CursorIcon::System(SystemCursorIcon::Pointer),
            _ if *self == EditorTool::Label => CursorIcon::System(SystemCursorIcon::Text),
            _ => CursorIcon::System(SystemCursorIcon::Crosshair),
        }
    }
}

#[derive(Resource, Default)]
pub struct CurrentTool {
    pub tool: EditorTool,
}

#[derive(Resource, Default)]
pub struct SelectedLayer {
    pub layer: MapLayer,
}

/// Family keys pick a field, mode keys pick how it is edited:
///
/// - T/O/F/C/L: terrain, object, fence, overlay (colour), label
/// - P/B/E/G/N/I: pencil, brush, eraser, fill, line, picker
/// - Tab: toggle surface/cave, =/-: zoom the cell size
pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut current_tool: ResMut<CurrentTool>,
    mut selected_layer: ResMut<SelectedLayer>,
    mut cell_size: ResMut<CellSize>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl {
        return;
    }

    let family = if keyboard.just_pressed(KeyCode::KeyT) {
        Some(ToolFamily::Terrain)
    } else if keyboard.just_pressed(KeyCode::KeyO) {
        Some(ToolFamily::Object)
    } else if keyboard.just_pressed(KeyCode::KeyF) {
        Some(ToolFamily::Fence)
    } else if keyboard.just_pressed(KeyCode::KeyC) {
        Some(ToolFamily::Overlay)
    } else if keyboard.just_pressed(KeyCode::KeyL) {
        Some(ToolFamily::Label)
    } else {
        None
    };

    let mode = if keyboard.just_pressed(KeyCode::KeyP) {
        Some(ToolMode::Pencil)
    } else if keyboard.just_pressed(KeyCode::KeyB) {
        Some(ToolMode::Brush)
    } else if keyboard.just_pressed(KeyCode::KeyE) {
        Some(ToolMode::Eraser)
    } else if keyboard.just_pressed(KeyCode::KeyG) {
        Some(ToolMode::Fill)
    } else if keyboard.just_pressed(KeyCode::KeyN) {
        Some(ToolMode::Line)
    } else if keyboard.just_pressed(KeyCode::KeyI) {
        Some(ToolMode::Picker)
    } else {
        None
    };

    if let Some(family) = family
        && let Some(tool) = EditorTool::from_parts(family, ToolMode::Pencil)
    {
        current_tool.tool = tool;
    }

    if let Some(mode) = mode
        && let Some(tool) = current_tool.tool.with_mode(mode)
    {
        current_tool.tool = tool;
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        selected_layer.layer = selected_layer.layer.toggled();
        info!("Editing {} layer", selected_layer.layer.display_name());
    }

    if keyboard.just_pressed(KeyCode::Equal) && cell_size.zoom_in() {
        debug!("Cell size {}px", cell_size.pixels());
    } else if keyboard.just_pressed(KeyCode::Minus) && cell_size.zoom_out() {
        debug!("Cell size {}px", cell_size.pixels());
    }
}

pub fn update_cursor_icon(
    current_tool: Res<CurrentTool>,
    mut window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((entity, _window)) = window_query.single_mut() else {
        return;
    };

    // Use default cursor over UI, tool cursor over the map
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands.entity(entity).insert(current_tool.tool.cursor_icon());
}
