//! Undo/Redo system for map edits.
//!
//! Every gesture (pointer down, drag, pointer up) produces at most one
//! [`EditorCommand`]: an ordered batch of atomic [`TileEdit`]s. Committing it
//! through [`CommandHistory`] applies it and makes it undoable as a unit.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last gesture
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone gesture
//!
//! ## Module Structure
//!
//! - [`edits`] - TileChange payloads and the reversible TileEdit
//! - [`execute`] - The executor that writes a change into tile fields
//! - [`commands`] - EditorCommand, the per-gesture batch
//! - [`command_history`] - CommandHistory resource with the undo cursor
//! - [`systems`] - Bevy systems for keyboard shortcuts

mod command_history;
mod commands;
mod edits;
mod execute;
mod systems;


// Re-exports
pub use command_history::CommandHistory;
pub use commands::EditorCommand;
pub use edits::{TileChange, TileEdit};
pub use systems::{handle_redo, handle_undo};
