//! Anteater IDE - desktop IDE for the AnteaterLang scripting language
//!
//! Tabbed editing of AnteaterLang and C acc library sources, keyword
//! highlighting, per-project session persistence, and one-click dispatch of
//! the external interpreter and the system C compiler.

pub mod commands;
pub mod frontend;

// Re-export crates
pub use anteater_build_engine as build_engine;
pub use anteater_editor as editor;

pub use commands::IdeController;
pub use frontend::{Frontend, NullFrontend};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Anteater IDE";
