//! Anteater IDE
//!
//! Main entry point: initializes logging, restores the project session,
//! probes the toolchain, and reports status. A widget shell drives
//! [`IdeController`] for interactive use; without one the process runs in
//! CLI mode and exits after the report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use anteater_ide::commands::IdeController;
use anteater_ide::frontend::NullFrontend;
use anteater_ide::{APP_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("{} v{} starting...", APP_NAME, VERSION);

    let project_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    info!("Project root: {:?}", project_root);

    let mut controller = IdeController::new(project_root, Arc::new(NullFrontend));
    controller.restore_session().await?;
    info!("Restored {} tab(s) from the stored session", controller.tabs().len());

    controller.check_language_version();
    match controller.language_version() {
        Some(version) => info!("Found {}", version),
        None => info!("AnteaterLang toolchain not found on PATH"),
    }

    info!("Running in CLI mode (no widget shell attached)");
    info!("Interactive surface commands:");
    info!("  - run: execute the configured AnteaterLang source");
    info!("  - compile: build the C acc library");
    info!("  - shell: run an arbitrary command in the terminal pane");

    controller.save_session().await?;
    Ok(())
}
