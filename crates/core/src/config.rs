//! Project session settings
//!
//! Manages the per-project session record:
//! - editor and terminal font sizes, tab width
//! - configured AnteaterLang and C acc library source paths
//! - the list of files that were open when the project was closed
//!
//! One record per project, rewritten wholesale at shutdown. A session file
//! that cannot be read or parsed is reported as corrupted; the caller
//! discards it and falls back to defaults, with no partial recovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AnteaterError, Result};
use crate::lang;

/// Per-project session settings.
///
/// Open-file paths are stored relative to the project root so the record
/// stays valid when the project directory moves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Project root directory
    pub project_root: PathBuf,
    /// Editor font size in points
    pub editor_font_size: u32,
    /// Terminal font size in points
    pub terminal_font_size: u32,
    /// Number of spaces per tab stop
    pub tab_spaces: u32,
    /// Configured AnteaterLang source file
    pub lang_source: Option<PathBuf>,
    /// Configured C acc library source file
    pub c_library_source: Option<PathBuf>,
    /// Files that were open, relative to the project root
    pub open_files: Vec<PathBuf>,
}

impl SessionConfig {
    /// Hard-coded defaults for a project.
    pub fn defaults_for(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            editor_font_size: lang::DEFAULT_EDITOR_FONT_SIZE,
            terminal_font_size: lang::DEFAULT_TERMINAL_FONT_SIZE,
            tab_spaces: lang::DEFAULT_TAB_SPACES,
            lang_source: None,
            c_library_source: None,
            open_files: Vec::new(),
        }
    }

    /// Location of the session file for a project.
    pub fn session_file(root: &Path) -> PathBuf {
        root.join(lang::SESSION_FILE_NAME)
    }

    /// Load the session record for a project.
    ///
    /// Returns `Ok(None)` when no session file exists. Any read or parse
    /// failure on an existing file is reported as corruption.
    pub async fn load(root: &Path) -> Result<Option<Self>> {
        let file = Self::session_file(root);
        if !file.exists() {
            debug!("No session file at {:?}", file);
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&file)
            .await
            .map_err(|_| AnteaterError::CorruptSession(file.clone()))?;
        let config: SessionConfig = serde_json::from_str(&contents)
            .map_err(|_| AnteaterError::CorruptSession(file.clone()))?;

        debug!("Loaded session from {:?}", file);
        Ok(Some(config))
    }

    /// Rewrite the session record wholesale.
    pub async fn save(&self) -> Result<()> {
        let file = Self::session_file(&self.project_root);
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&file, contents).await?;

        debug!("Session saved to {:?}", file);
        Ok(())
    }

    /// Remove a project's session file, if present.
    pub async fn discard(root: &Path) -> Result<()> {
        let file = Self::session_file(root);
        if file.exists() {
            tokio::fs::remove_file(&file).await?;
            info!("Removed session file {:?}", file);
        }
        Ok(())
    }

    /// Resolve a stored open-file entry against the project root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Store an absolute path relative to the project root. Paths outside
    /// the root are kept as-is.
    pub fn relativize(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.project_root)
            .unwrap_or(path)
            .to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::defaults_for("/tmp/project");
        assert_eq!(config.editor_font_size, 15);
        assert_eq!(config.terminal_font_size, 15);
        assert_eq!(config.tab_spaces, 4);
        assert!(config.lang_source.is_none());
        assert!(config.open_files.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SessionConfig::defaults_for(dir.path());
        config.editor_font_size = 18;
        config.lang_source = Some(PathBuf::from("main.ant"));
        config.open_files = vec![PathBuf::from("main.ant"), PathBuf::from("lib/util.ant")];

        config.save().await.unwrap();
        let loaded = SessionConfig::load(dir.path()).await.unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SessionConfig::load(dir.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(SessionConfig::session_file(dir.path()), b"{not json")
            .await
            .unwrap();

        match SessionConfig::load(dir.path()).await {
            Err(AnteaterError::CorruptSession(_)) => {}
            other => panic!("expected corruption, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        // Valid JSON, wrong shape.
        tokio::fs::write(
            SessionConfig::session_file(dir.path()),
            b"{\"editor_font_size\": \"huge\"}",
        )
        .await
        .unwrap();

        assert!(matches!(
            SessionConfig::load(dir.path()).await,
            Err(AnteaterError::CorruptSession(_))
        ));
    }

    #[test]
    fn test_relativize_and_resolve() {
        let config = SessionConfig::defaults_for("/home/user/project");
        let inside = PathBuf::from("/home/user/project/src/main.ant");
        let relative = config.relativize(&inside);
        assert_eq!(relative, PathBuf::from("src/main.ant"));
        assert_eq!(config.resolve(&relative), inside);

        let outside = PathBuf::from("/etc/hosts");
        assert_eq!(config.relativize(&outside), outside);
    }
}
