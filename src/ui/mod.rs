mod resize_dialog;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::editor::LabelPrompt;

pub use resize_dialog::ResizeDialogState;

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    resize_dialog: Res<ResizeDialogState>,
    label_prompt: Res<LabelPrompt>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = resize_dialog.is_open || label_prompt.is_open();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<ResizeDialogState>()
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::toolbar_ui, toolbar::tool_settings_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                resize_dialog::resize_dialog_ui.after(toolbar::toolbar_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
