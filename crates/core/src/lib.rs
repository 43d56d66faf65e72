//! Anteater core - session state and shared types
//!
//! This crate provides the pieces every other Anteater IDE crate leans on:
//! per-project session settings, the shared terminal output surface, the
//! event bus, error types, and the fixed AnteaterLang toolchain conventions.

pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod lang;

pub use config::SessionConfig;
pub use console::{Console, ConsoleLine, MessageColor};
pub use error::{AnteaterError, Result};
pub use events::{Event, EventBus, EventSubscription};

/// Anteater IDE version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Anteater IDE";
