//! Modal interaction surface
//!
//! The widget toolkit is an external collaborator; the controller only
//! needs its blocking prompts. Every method blocks the interactive thread
//! until the user answers, which is the intended modal behavior.

use std::path::PathBuf;

/// Blocking modal prompts provided by the widget shell.
pub trait Frontend: Send + Sync {
    /// Path picker for creating or re-binding a file. `None` on cancel.
    fn pick_save_path(&self) -> Option<PathBuf>;

    /// Multi-file open picker. Empty on cancel.
    fn pick_open_paths(&self) -> Vec<PathBuf>;

    /// Single-file picker titled for the given source kind. `None` on
    /// cancel.
    fn pick_source_path(&self, description: &str) -> Option<PathBuf>;

    /// Yes/no prompt.
    fn confirm(&self, title: &str, question: &str) -> bool;

    /// Informational notice.
    fn notify(&self, title: &str, message: &str);

    /// Integer entry prompt. `None` on cancel.
    fn ask_integer(&self, title: &str, prompt: &str, initial: u32) -> Option<u32>;
}

/// Frontend for headless operation: never picks, never confirms, and logs
/// notices instead of showing dialogs.
#[derive(Debug, Default)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn pick_save_path(&self) -> Option<PathBuf> {
        None
    }

    fn pick_open_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn pick_source_path(&self, _description: &str) -> Option<PathBuf> {
        None
    }

    fn confirm(&self, _title: &str, _question: &str) -> bool {
        false
    }

    fn notify(&self, title: &str, message: &str) {
        tracing::info!("{}: {}", title, message);
    }

    fn ask_integer(&self, _title: &str, _prompt: &str, _initial: u32) -> Option<u32> {
        None
    }
}
