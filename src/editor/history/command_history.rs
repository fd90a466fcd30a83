//! Command history resource for tracking undo/redo state.

use bevy::prelude::*;

use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::map::TileGrid;

use super::commands::EditorCommand;

/// Committed gestures plus a cursor.
///
/// Everything before the cursor is applied, everything from the cursor on has
/// been undone and can be redone.
#[derive(Resource)]
pub struct CommandHistory {
    commands: Vec<EditorCommand>,
    cursor: usize,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.trim();
    }

    /// Execute a command and record it, dropping anything that could be redone.
    ///
    /// Empty commands are ignored. Returns whether the command was recorded.
    pub fn commit(&mut self, mut command: EditorCommand, grid: &mut TileGrid) -> bool {
        if command.is_empty() {
            return false;
        }
        command.execute(grid);

        self.commands.truncate(self.cursor);
        self.commands.push(command);
        self.cursor = self.commands.len();
        self.trim();
        true
    }

    pub fn undo(&mut self, grid: &mut TileGrid) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.commands[self.cursor].undo(grid);
        true
    }

    pub fn redo(&mut self, grid: &mut TileGrid) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.commands[self.cursor].redo(grid);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// The command the next undo would revert
    pub fn peek_undo(&self) -> Option<&EditorCommand> {
        self.cursor.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    // Oldest commands go first; the cursor follows so it keeps pointing at the
    // same command.
    fn trim(&mut self) {
        let excess = self.commands.len().saturating_sub(self.limit);
        if excess > 0 {
            self.commands.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}
