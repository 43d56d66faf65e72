//! Tab management
//!
//! Owns the set of open documents. The tab-id to path mapping is the
//! authoritative record of which file a tab edits; nothing else tracks it.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use anteater_core::{AnteaterError, Result};

use crate::document::Document;
use crate::syntax::{self, Classification, HighlightSpan};

/// Identifier of one open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One open document and its editing-surface state.
pub struct Tab {
    pub id: TabId,
    pub document: Document,
    /// Current highlight spans, recomputed on every edit pass.
    pub highlights: Vec<HighlightSpan>,
}

/// Ordered set of open tabs.
#[derive(Default)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active: Option<TabId>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file in a new tab and make it active.
    ///
    /// Repeated opens of the same path produce independent tabs whose
    /// buffers are not synchronized.
    pub async fn open(&mut self, path: &Path) -> Result<TabId> {
        let document = Document::from_file(path.to_path_buf()).await?;
        let id = self.push_tab(document);
        info!("Opened {:?}", path);
        Ok(id)
    }

    /// Open a new tab with no backing file.
    pub fn open_empty(&mut self) -> TabId {
        self.push_tab(Document::new())
    }

    /// Create an empty file at `path`, then open it.
    pub async fn create_new(&mut self, path: &Path) -> Result<TabId> {
        tokio::fs::write(path, "").await?;
        self.open(path).await
    }

    fn push_tab(&mut self, document: Document) -> TabId {
        let id = TabId::new();
        self.tabs.push(Tab {
            id,
            document,
            highlights: Vec::new(),
        });
        self.active = Some(id);
        self.rehighlight(id);
        id
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    /// Make a tab active. Returns false for an unknown id.
    pub fn set_active(&mut self, id: TabId) -> bool {
        if self.tabs.iter().any(|t| t.id == id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut Tab> {
        self.get_mut(id)
            .ok_or_else(|| AnteaterError::UnknownTab(id.to_string()))
    }

    /// Save a tab to its backing file.
    ///
    /// `Ok(false)` means the tab has no backing path yet and the caller
    /// should fall back to save-as.
    pub async fn save(&mut self, id: TabId) -> Result<bool> {
        let tab = self.tab_mut(id)?;
        if tab.document.path().is_none() {
            return Ok(false);
        }
        tab.document.save().await?;
        Ok(true)
    }

    /// Save every tab that has a backing path; pathless tabs are skipped.
    pub async fn save_all(&mut self) -> Result<()> {
        for tab in &mut self.tabs {
            if tab.document.path().is_some() {
                tab.document.save().await?;
            }
        }
        Ok(())
    }

    /// Write a tab's content to `path` and rebind the tab to it. The old
    /// file, if any, is left in place.
    pub async fn save_as(&mut self, id: TabId, path: &Path) -> Result<()> {
        let tab = self.tab_mut(id)?;
        tab.document.save_as(path.to_path_buf()).await?;
        // The extension may have changed classification.
        self.rehighlight(id);
        Ok(())
    }

    /// Remove a tab and its path binding unconditionally, returning the
    /// binding. The next tab in order becomes active.
    pub fn close(&mut self, id: TabId) -> Option<PathBuf> {
        let pos = self.tabs.iter().position(|t| t.id == id)?;
        let tab = self.tabs.remove(pos);

        if self.active == Some(id) {
            self.active = self
                .tabs
                .get(pos)
                .or_else(|| self.tabs.last())
                .map(|t| t.id);
        }

        let path = tab.document.path().cloned();
        if let Some(path) = &path {
            info!("Closed {:?}", path);
        }
        path
    }

    /// Remove every tab.
    pub fn close_all(&mut self) {
        self.tabs.clear();
        self.active = None;
    }

    /// Recompute a tab's highlight spans from its path classification.
    /// Unrecognized or missing extensions clear the spans.
    pub fn rehighlight(&mut self, id: TabId) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) {
            tab.highlights = match tab
                .document
                .path()
                .and_then(|p| Classification::from_path(p))
            {
                Some(classification) => {
                    syntax::rehighlight(&tab.document.text(), classification)
                }
                None => Vec::new(),
            };
        }
    }

    /// Current tab to path bindings, in tab order.
    pub fn bindings(&self) -> Vec<(TabId, Option<PathBuf>)> {
        self.tabs
            .iter()
            .map(|t| (t.id, t.document.path().cloned()))
            .collect()
    }

    /// Paths of open tabs that have one, in tab order.
    pub fn open_paths(&self) -> Vec<PathBuf> {
        self.tabs
            .iter()
            .filter_map(|t| t.document.path().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
