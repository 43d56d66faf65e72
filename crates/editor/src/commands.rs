//! Edit commands
//!
//! The edit-menu surface: a clipboard-owning executor applying undoable
//! operations to the active document.

use crate::document::Document;

/// Editor command type
#[derive(Debug, Clone)]
pub enum EditCommand {
    // Undo/Redo
    Undo,
    Redo,

    // Clipboard commands
    Cut,
    Copy,
    Paste,

    // Selection commands
    Delete,
    SelectAll,

    // Typing surface
    InsertText(String),
    InsertNewline,
    InsertTab,
}

/// Command execution result
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Command executor holding the in-process clipboard.
pub struct EditExecutor {
    clipboard: String,
}

impl EditExecutor {
    pub fn new() -> Self {
        Self {
            clipboard: String::new(),
        }
    }

    /// Execute a command on a document.
    pub fn execute(&mut self, command: EditCommand, document: &mut Document) -> CommandResult {
        match command {
            EditCommand::Undo => {
                if document.undo() {
                    CommandResult::with_message("Undone")
                } else {
                    CommandResult::with_message("Nothing to undo")
                }
            }

            EditCommand::Redo => {
                if document.redo() {
                    CommandResult::with_message("Redone")
                } else {
                    CommandResult::with_message("Nothing to redo")
                }
            }

            EditCommand::Copy => {
                if let Some(text) = document.selected_text() {
                    self.clipboard = text;
                    CommandResult::with_message("Copied to clipboard")
                } else {
                    CommandResult::with_message("No selection to copy")
                }
            }

            EditCommand::Cut => {
                if let Some(text) = document.selected_text() {
                    self.clipboard = text;
                    document.delete_selection();
                    CommandResult::with_message("Cut to clipboard")
                } else {
                    CommandResult::with_message("No selection to cut")
                }
            }

            EditCommand::Paste => {
                document.delete_selection();
                let text = self.clipboard.clone();
                let at = document.cursor();
                document.insert(at, &text);
                CommandResult::ok()
            }

            EditCommand::Delete => {
                document.delete_selection();
                CommandResult::ok()
            }

            EditCommand::SelectAll => {
                document.select_all();
                CommandResult::ok()
            }

            EditCommand::InsertText(text) => {
                document.delete_selection();
                let at = document.cursor();
                document.insert(at, &text);
                CommandResult::ok()
            }

            EditCommand::InsertNewline => {
                document.delete_selection();
                document.insert_newline();
                CommandResult::ok()
            }

            EditCommand::InsertTab => {
                document.delete_selection();
                document.insert_tab();
                CommandResult::ok()
            }
        }
    }

    /// Get clipboard content
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }
}

impl Default for EditExecutor {
    fn default() -> Self {
        Self::new()
    }
}
