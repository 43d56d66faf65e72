//! Document buffer
//!
//! Rope-backed text buffer with undo/redo, bound to at most one backing
//! file. One document per tab; the tab manager owns the binding.

use std::ops::Range;
use std::path::PathBuf;

use ropey::Rope;

use anteater_core::{AnteaterError, Result};

/// Edit operation for undo/redo
#[derive(Debug, Clone)]
pub enum EditOp {
    Insert { at: usize, text: String },
    Delete { at: usize, text: String },
}

impl EditOp {
    /// Get the inverse operation for undo
    fn inverse(&self) -> Self {
        match self {
            EditOp::Insert { at, text } => EditOp::Delete {
                at: *at,
                text: text.clone(),
            },
            EditOp::Delete { at, text } => EditOp::Insert {
                at: *at,
                text: text.clone(),
            },
        }
    }
}

/// An editable text buffer. Offsets are char indices into the rope.
pub struct Document {
    rope: Rope,
    /// Backing file; unset for a buffer that has never been saved.
    path: Option<PathBuf>,
    dirty: bool,
    undo_stack: Vec<EditOp>,
    redo_stack: Vec<EditOp>,
    max_undo_history: usize,
    cursor: usize,
    selection: Option<Range<usize>>,
    tab_spaces: usize,
}

impl Document {
    /// Create a new empty buffer with no backing file.
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Create a buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            path: None,
            dirty: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_history: 1000,
            cursor: 0,
            selection: None,
            tab_spaces: 4,
        }
    }

    /// Load a buffer from a file.
    pub async fn from_file(path: PathBuf) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        let mut document = Self::from_str(&content);
        document.path = Some(path);
        Ok(document)
    }

    /// Overwrite the backing file with the full buffer content.
    pub async fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(AnteaterError::NoBackingFile)?;
        tokio::fs::write(&path, self.rope.to_string()).await?;
        self.dirty = false;
        Ok(())
    }

    /// Write the buffer to a new file and rebind to it. The previous
    /// backing file, if any, is left in place.
    pub async fn save_as(&mut self, path: PathBuf) -> Result<()> {
        tokio::fs::write(&path, self.rope.to_string()).await?;
        self.path = Some(path);
        self.dirty = false;
        Ok(())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, at: usize) {
        self.cursor = at.min(self.rope.len_chars());
    }

    pub fn set_tab_spaces(&mut self, spaces: usize) {
        self.tab_spaces = spaces;
    }

    /// Insert text at a char index and move the cursor past it.
    pub fn insert(&mut self, at: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = at.min(self.rope.len_chars());

        self.push_undo(EditOp::Insert {
            at,
            text: text.to_string(),
        });

        self.rope.insert(at, text);
        self.dirty = true;
        self.cursor = at + text.chars().count();
    }

    /// Delete a char range and move the cursor to its start.
    pub fn delete(&mut self, range: Range<usize>) {
        if range.start >= range.end || range.start >= self.rope.len_chars() {
            return;
        }
        let end = range.end.min(self.rope.len_chars());
        let deleted = self.rope.slice(range.start..end).to_string();

        self.push_undo(EditOp::Delete {
            at: range.start,
            text: deleted,
        });

        self.rope.remove(range.start..end);
        self.dirty = true;
        self.cursor = range.start;
    }

    fn push_undo(&mut self, op: EditOp) {
        self.undo_stack.push(op);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_undo_history {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last operation.
    pub fn undo(&mut self) -> bool {
        if let Some(op) = self.undo_stack.pop() {
            self.apply(&op.inverse());
            self.redo_stack.push(op);
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation.
    pub fn redo(&mut self) -> bool {
        if let Some(op) = self.redo_stack.pop() {
            self.apply(&op);
            self.undo_stack.push(op);
            true
        } else {
            false
        }
    }

    /// Apply an edit operation without recording it.
    fn apply(&mut self, op: &EditOp) {
        match op {
            EditOp::Insert { at, text } => {
                let at = (*at).min(self.rope.len_chars());
                self.rope.insert(at, text);
                self.cursor = at + text.chars().count();
            }
            EditOp::Delete { at, text } => {
                let at = (*at).min(self.rope.len_chars());
                let end = (at + text.chars().count()).min(self.rope.len_chars());
                self.rope.remove(at..end);
                self.cursor = at;
            }
        }
        self.dirty = true;
    }

    pub fn selection(&self) -> Option<&Range<usize>> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Range<usize>>) {
        self.selection = selection;
    }

    /// Select the whole buffer and park the cursor at the start.
    pub fn select_all(&mut self) {
        self.selection = Some(0..self.rope.len_chars());
        self.cursor = 0;
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection
            .as_ref()
            .map(|range| self.rope.slice(range.clone()).to_string())
    }

    /// Delete the current selection, if any.
    pub fn delete_selection(&mut self) -> bool {
        if let Some(range) = self.selection.take() {
            self.delete(range);
            true
        } else {
            false
        }
    }

    /// Insert spaces for one tab stop at the cursor.
    pub fn insert_tab(&mut self) {
        let text = " ".repeat(self.tab_spaces);
        self.insert(self.cursor, &text);
    }

    /// Insert a newline with brace-aware auto-indent.
    ///
    /// The new line keeps the current line's leading spaces. A `{`
    /// immediately before the cursor adds one level and drops a matching
    /// `}` on its own line below; a line ending in `}` loses one level.
    pub fn insert_newline(&mut self) {
        let at = self.cursor;
        let line_idx = self.rope.char_to_line(at);
        let line = self.rope.line(line_idx).to_string();
        let indent = line.chars().take_while(|c| *c == ' ').count();

        let opens_block = at > 0 && self.rope.char(at - 1) == '{';
        let new_indent = if opens_block {
            indent + self.tab_spaces
        } else if line.trim_end().ends_with('}') {
            indent.saturating_sub(self.tab_spaces)
        } else {
            indent
        };

        self.insert(at, &format!("\n{}", " ".repeat(new_indent)));

        if opens_block {
            let between = self.cursor;
            self.insert(between, &format!("\n{}}}", " ".repeat(indent)));
            // Leave the cursor on the indented line between the braces.
            self.cursor = between;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
