//! Gesture-scoped compound command.

use crate::editor::tools::EditorTool;
use crate::map::TileGrid;

use super::edits::TileEdit;

/// All atomic edits recorded during one pointer-down, drag, pointer-up cycle.
///
/// Executes in recorded order and undoes in reverse, because a later edit may
/// sit on a tile an earlier edit created.
#[derive(Clone, Debug)]
pub struct EditorCommand {
    tool: EditorTool,
    edits: Vec<TileEdit>,
}

impl EditorCommand {
    pub fn new(tool: EditorTool) -> Self {
        Self {
            tool,
            edits: Vec::new(),
        }
    }

    pub fn tool(&self) -> EditorTool {
        self.tool
    }

    pub fn push(&mut self, edit: TileEdit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn execute(&mut self, grid: &mut TileGrid) {
        for edit in &mut self.edits {
            edit.execute(grid);
        }
    }

    pub fn redo(&mut self, grid: &mut TileGrid) {
        for edit in &mut self.edits {
            edit.redo(grid);
        }
    }

    pub fn undo(&mut self, grid: &mut TileGrid) {
        for edit in self.edits.iter_mut().rev() {
            edit.undo(grid);
        }
    }
}
