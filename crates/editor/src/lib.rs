//! Anteater editor - documents, tabs, and keyword highlighting
//!
//! Editing primitives for the IDE: the rope-backed document buffer, the
//! edit-command executor, the tab manager, and the keyword highlighter.

pub mod commands;
pub mod document;
pub mod syntax;
pub mod tabs;

pub use commands::{EditCommand, EditExecutor};
pub use document::Document;
pub use syntax::{Classification, HighlightSpan};
pub use tabs::{Tab, TabId, TabManager};
