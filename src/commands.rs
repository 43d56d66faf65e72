//! Interactive surface
//!
//! Every menu and button action is a method on [`IdeController`], which
//! owns the application state: session settings, open tabs, the shared
//! console, and the dispatchers for external tools.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use anteater_build_engine::{
    toolchain, DispatchError, LibraryBuilder, ProcessRunner, ProgramRunner, ShellExecutor,
    SystemRunner,
};
use anteater_core::{
    lang, AnteaterError, Console, Event, EventBus, MessageColor, Result, SessionConfig,
};
use anteater_editor::{EditCommand, EditExecutor, TabId, TabManager};

use crate::frontend::Frontend;

/// Top-level controller behind the menus, buttons, and key bindings.
pub struct IdeController {
    config: SessionConfig,
    tabs: TabManager,
    editor: EditExecutor,
    console: Arc<Console>,
    events: Arc<EventBus>,
    frontend: Arc<dyn Frontend>,
    runner: Arc<dyn ProcessRunner>,
    library_builder: LibraryBuilder,
    program_runner: ProgramRunner,
    shell: ShellExecutor,
    language_version: Option<String>,
}

impl IdeController {
    pub fn new(project_root: PathBuf, frontend: Arc<dyn Frontend>) -> Self {
        Self::with_runner(project_root, frontend, Arc::new(SystemRunner))
    }

    /// Construct with an explicit process runner.
    pub fn with_runner(
        project_root: PathBuf,
        frontend: Arc<dyn Frontend>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let console = Arc::new(Console::new());
        let events = Arc::new(EventBus::new());

        let library_builder =
            LibraryBuilder::new(project_root.clone(), console.clone(), runner.clone());
        let program_runner =
            ProgramRunner::new(project_root.clone(), console.clone(), runner.clone());
        let shell = ShellExecutor::new(project_root.clone(), console.clone(), runner.clone());

        Self {
            config: SessionConfig::defaults_for(project_root),
            tabs: TabManager::new(),
            editor: EditExecutor::new(),
            console,
            events,
            frontend,
            runner,
            library_builder,
            program_runner,
            shell,
            language_version: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    pub fn console(&self) -> &Arc<Console> {
        &self.console
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn language_version(&self) -> Option<&str> {
        self.language_version.as_deref()
    }

    // --- session lifecycle ---

    /// Load the stored session and reopen its files.
    ///
    /// A malformed store, or one referencing a file that can no longer be
    /// opened, is discarded wholesale: defaults restored, every
    /// speculatively opened tab closed, and a notice logged. No partial
    /// recovery.
    pub async fn restore_session(&mut self) -> Result<()> {
        let root = self.config.project_root.clone();
        match SessionConfig::load(&root).await {
            Ok(None) => Ok(()),
            Ok(Some(config)) => {
                self.config = config;
                for relative in self.config.open_files.clone() {
                    let path = self.config.resolve(&relative);
                    if let Err(e) = self.tabs.open(&path).await {
                        warn!("Failed to reopen {:?}: {}", path, e);
                        self.discard_session().await?;
                        return Ok(());
                    }
                    self.configure_active_tab();
                }
                info!("Session restored with {} tab(s)", self.tabs.len());
                self.events.emit(Event::SessionRestored {
                    tabs: self.tabs.len(),
                });
                Ok(())
            }
            Err(_) => {
                self.discard_session().await?;
                Ok(())
            }
        }
    }

    async fn discard_session(&mut self) -> Result<()> {
        let root = self.config.project_root.clone();
        let file = SessionConfig::session_file(&root);

        SessionConfig::discard(&root).await?;
        self.config = SessionConfig::defaults_for(root);
        self.tabs.close_all();

        self.console.print_message(
            &format!(
                "Prior IDE session @ {} is corrupted, file removed.",
                file.display()
            ),
            MessageColor::Blue,
        );
        self.events.emit(Event::SessionDiscarded);
        Ok(())
    }

    /// Persist the session record: open tabs are stored relative to the
    /// project root; pathless tabs are omitted.
    pub async fn save_session(&mut self) -> Result<()> {
        self.config.open_files = self
            .tabs
            .open_paths()
            .iter()
            .map(|path| self.config.relativize(path))
            .collect();
        self.config.save().await
    }

    /// Exit hook: offer to save all files, then write the session record.
    pub async fn shutdown(&mut self) -> Result<()> {
        if self
            .frontend
            .confirm("Exit", "Do you want to save all files before exiting?")
        {
            self.save_all_files().await?;
        }
        self.events.emit(Event::Shutdown);
        self.save_session().await
    }

    // --- file menu ---

    /// Create an empty file at a picked path and open it in a new tab.
    pub async fn new_file(&mut self) -> Result<TabId> {
        let path = self
            .frontend
            .pick_save_path()
            .ok_or(AnteaterError::PathCancelled)?;
        let id = self.tabs.create_new(&path).await?;
        self.configure_active_tab();
        self.events.emit(Event::FileCreated(path));
        Ok(id)
    }

    /// Open one tab per picked file. Picking the same file twice opens two
    /// independent tabs.
    pub async fn open_file(&mut self) -> Result<Vec<TabId>> {
        let mut opened = Vec::new();
        for path in self.frontend.pick_open_paths() {
            let id = self.tabs.open(&path).await?;
            self.configure_active_tab();
            self.events.emit(Event::FileOpened(path));
            opened.push(id);
        }
        Ok(opened)
    }

    /// Save the active tab; falls back to save-as when it has no backing
    /// file yet.
    pub async fn save_file(&mut self) -> Result<()> {
        let id = self.tabs.active().ok_or(AnteaterError::NoActiveTab)?;
        if self.tabs.save(id).await? {
            if let Some(path) = self.tabs.get(id).and_then(|t| t.document.path().cloned()) {
                self.events.emit(Event::FileSaved(path));
            }
            Ok(())
        } else {
            self.save_as_file().await
        }
    }

    /// Save every open tab that has a backing file.
    pub async fn save_all_files(&mut self) -> Result<()> {
        self.tabs.save_all().await
    }

    /// Write the active tab to a picked path and rebind it.
    pub async fn save_as_file(&mut self) -> Result<()> {
        let id = self.tabs.active().ok_or(AnteaterError::NoActiveTab)?;
        let path = self
            .frontend
            .pick_save_path()
            .ok_or(AnteaterError::PathCancelled)?;
        self.tabs.save_as(id, &path).await?;
        self.events.emit(Event::FileSaved(path));
        Ok(())
    }

    /// Close the active tab, offering to save it first when it is bound to
    /// a file. The tab is removed regardless of the answer.
    pub async fn close_current_tab(&mut self) -> Result<()> {
        let Some(id) = self.tabs.active() else {
            return Ok(());
        };

        let has_path = self
            .tabs
            .get(id)
            .map(|t| t.document.path().is_some())
            .unwrap_or(false);
        if has_path
            && self.frontend.confirm(
                "Save File",
                "Do you want to save changes to this file before closing?",
            )
        {
            self.tabs.save(id).await?;
        }

        let path = self.tabs.close(id);
        self.events.emit(Event::TabClosed(path));
        Ok(())
    }

    // --- edit menu ---

    fn edit(&mut self, command: EditCommand) -> Result<()> {
        let id = self.tabs.active().ok_or(AnteaterError::NoActiveTab)?;
        if let Some(tab) = self.tabs.get_mut(id) {
            self.editor.execute(command, &mut tab.document);
        }
        self.tabs.rehighlight(id);
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.edit(EditCommand::Undo)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.edit(EditCommand::Redo)
    }

    pub fn cut(&mut self) -> Result<()> {
        self.edit(EditCommand::Cut)
    }

    pub fn copy(&mut self) -> Result<()> {
        self.edit(EditCommand::Copy)
    }

    pub fn paste(&mut self) -> Result<()> {
        self.edit(EditCommand::Paste)
    }

    pub fn delete_selection(&mut self) -> Result<()> {
        self.edit(EditCommand::Delete)
    }

    pub fn select_all(&mut self) -> Result<()> {
        self.edit(EditCommand::SelectAll)
    }

    /// Typing surface: insert text at the cursor of the active document.
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        self.edit(EditCommand::InsertText(text.to_string()))
    }

    /// Typing surface: newline with brace-aware auto-indent.
    pub fn insert_newline(&mut self) -> Result<()> {
        self.edit(EditCommand::InsertNewline)
    }

    /// Typing surface: one tab stop of spaces.
    pub fn insert_tab(&mut self) -> Result<()> {
        self.edit(EditCommand::InsertTab)
    }

    /// Key-release hook: recompute highlighting for the active buffer.
    pub fn rehighlight_active(&mut self) {
        if let Some(id) = self.tabs.active() {
            self.tabs.rehighlight(id);
        }
    }

    pub fn change_editor_font_size(&mut self) {
        if let Some(size) = self.frontend.ask_integer(
            "Font Size",
            "Enter new font size:",
            self.config.editor_font_size,
        ) {
            self.config.editor_font_size = size;
            self.events.emit(Event::EditorFontChanged(size));
        }
    }

    pub fn change_terminal_font_size(&mut self) {
        if let Some(size) = self.frontend.ask_integer(
            "Font Size",
            "Enter new font size:",
            self.config.terminal_font_size,
        ) {
            self.config.terminal_font_size = size;
            self.events.emit(Event::TerminalFontChanged(size));
        }
    }

    // --- run menu ---

    pub fn set_lang_source(&mut self) {
        if let Some(path) = self.frontend.pick_source_path(lang::SOURCE_DESCRIPTION) {
            info!("AnteaterLang source set to {:?}", path);
            self.config.lang_source = Some(path);
        }
    }

    pub fn set_c_library_source(&mut self) {
        if let Some(path) = self.frontend.pick_source_path(lang::C_LIBRARY_DESCRIPTION) {
            info!("C acc library source set to {:?}", path);
            self.config.c_library_source = Some(path);
        }
    }

    /// Run the configured source through the interpreter, with or without
    /// the shared library. Buffers are flushed and the console cleared
    /// before dispatch; precondition failures surface as notices and
    /// nothing is invoked.
    pub async fn run(&mut self, with_library: bool) -> Result<()> {
        let plan = match self
            .program_runner
            .prepare(self.config.lang_source.as_deref(), with_library)
        {
            Ok(plan) => plan,
            Err(e) => {
                self.notify_dispatch_error(&e);
                return Ok(());
            }
        };

        self.save_all_files().await?;
        self.console.clear();
        self.program_runner.spawn(plan);
        self.events.emit(Event::RunStarted { with_library });
        Ok(())
    }

    /// Build the C acc library from the configured source. Same flush and
    /// clear discipline as [`run`](Self::run).
    pub async fn compile_library(&mut self) -> Result<()> {
        let plan = match self
            .library_builder
            .prepare(self.config.c_library_source.as_deref())
        {
            Ok(plan) => plan,
            Err(e) => {
                self.notify_dispatch_error(&e);
                return Ok(());
            }
        };

        self.save_all_files().await?;
        self.console.clear();
        self.library_builder.spawn(plan);
        self.events.emit(Event::CompileStarted);
        Ok(())
    }

    fn notify_dispatch_error(&self, error: &DispatchError) {
        self.frontend.notify(error.title(), &error.user_message());
    }

    // --- AnteaterLang menu ---

    /// Probe the interpreter for its version and show the result.
    pub fn check_language_version(&mut self) {
        self.language_version = toolchain::language_version(self.runner.as_ref());
        match &self.language_version {
            Some(version) => self.frontend.notify("AnteaterLang Version", version),
            None => self
                .frontend
                .notify("AnteaterLang Version", "AnteaterLang is not installed/found."),
        }
    }

    pub fn check_ide_version(&self) {
        self.frontend
            .notify("IDE Version", &format!("IDE Version: {}", crate::VERSION));
    }

    /// New tab pre-filled with the canned AnteaterLang hello-world.
    pub async fn load_sample_lang_source(&mut self) -> Result<TabId> {
        self.load_sample(lang::SAMPLE_ANT_SOURCE).await
    }

    /// New tab pre-filled with the canned C acc library skeleton.
    pub async fn load_sample_c_library_source(&mut self) -> Result<TabId> {
        self.load_sample(lang::SAMPLE_C_LIBRARY_SOURCE).await
    }

    async fn load_sample(&mut self, sample: &str) -> Result<TabId> {
        let id = self.new_file().await?;
        if let Some(tab) = self.tabs.get_mut(id) {
            let end = tab.document.len_chars();
            tab.document.insert(end, sample);
        }
        self.tabs.rehighlight(id);
        Ok(id)
    }

    // --- shell ---

    /// Execute one free-form shell command against the shared console.
    pub fn run_shell_command(&self, command: &str) {
        self.events.emit(Event::ShellCommand(command.to_string()));
        self.shell.dispatch(command);
    }

    /// Propagate the configured tab width to the newest tab.
    fn configure_active_tab(&mut self) {
        let tab_spaces = self.config.tab_spaces as usize;
        if let Some(id) = self.tabs.active() {
            if let Some(tab) = self.tabs.get_mut(id) {
                tab.document.set_tab_spaces(tab_spaces);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    /// Frontend scripted with queued dialog answers.
    #[derive(Default)]
    struct ScriptedFrontend {
        save_paths: Mutex<Vec<PathBuf>>,
        open_paths: Mutex<Vec<PathBuf>>,
        source_paths: Mutex<Vec<PathBuf>>,
        confirm_answer: Mutex<bool>,
        integer_answer: Mutex<Option<u32>>,
        notices: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedFrontend {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn queue_save_path(&self, path: PathBuf) {
            self.save_paths.lock().unwrap().push(path);
        }

        fn queue_open_paths(&self, paths: Vec<PathBuf>) {
            *self.open_paths.lock().unwrap() = paths;
        }

        fn queue_source_path(&self, path: PathBuf) {
            self.source_paths.lock().unwrap().push(path);
        }

        fn answer_confirm(&self, answer: bool) {
            *self.confirm_answer.lock().unwrap() = answer;
        }

        fn notices(&self) -> Vec<(String, String)> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl Frontend for ScriptedFrontend {
        fn pick_save_path(&self) -> Option<PathBuf> {
            let mut paths = self.save_paths.lock().unwrap();
            if paths.is_empty() {
                None
            } else {
                Some(paths.remove(0))
            }
        }

        fn pick_open_paths(&self) -> Vec<PathBuf> {
            std::mem::take(&mut self.open_paths.lock().unwrap())
        }

        fn pick_source_path(&self, _description: &str) -> Option<PathBuf> {
            let mut paths = self.source_paths.lock().unwrap();
            if paths.is_empty() {
                None
            } else {
                Some(paths.remove(0))
            }
        }

        fn confirm(&self, _title: &str, _question: &str) -> bool {
            *self.confirm_answer.lock().unwrap()
        }

        fn notify(&self, title: &str, message: &str) {
            self.notices
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }

        fn ask_integer(&self, _title: &str, _prompt: &str, _initial: u32) -> Option<u32> {
            *self.integer_answer.lock().unwrap()
        }
    }

    /// Runner that records invocations; root-level twin of the
    /// build-engine test double.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<anteater_build_engine::Invocation>>,
    }

    impl RecordingRunner {
        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(
            &self,
            invocation: &anteater_build_engine::Invocation,
        ) -> std::io::Result<anteater_build_engine::ProcessResult> {
            self.calls.lock().unwrap().push(invocation.clone());
            Ok(anteater_build_engine::ProcessResult {
                success: true,
                ..Default::default()
            })
        }
    }

    fn controller(
        root: &Path,
    ) -> (IdeController, Arc<ScriptedFrontend>, Arc<RecordingRunner>) {
        let frontend = ScriptedFrontend::new();
        let runner = Arc::new(RecordingRunner::default());
        let controller =
            IdeController::with_runner(root.to_path_buf(), frontend.clone(), runner.clone());
        (controller, frontend, runner)
    }

    #[tokio::test]
    async fn test_new_file_cancel_reports_path_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, _, _) = controller(dir.path());

        assert!(matches!(
            ide.new_file().await,
            Err(AnteaterError::PathCancelled)
        ));
        assert!(ide.tabs().is_empty());
    }

    #[tokio::test]
    async fn test_create_open_save_close_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, _) = controller(dir.path());

        let new_path = dir.path().join("main.ant");
        frontend.queue_save_path(new_path.clone());
        let created = ide.new_file().await.unwrap();
        assert!(new_path.exists());

        let other = dir.path().join("util.ant");
        tokio::fs::write(&other, "void function u() {}").await.unwrap();
        frontend.queue_open_paths(vec![other.clone()]);
        let opened = ide.open_file().await.unwrap();
        assert_eq!(opened.len(), 1);

        assert_eq!(
            ide.tabs().bindings(),
            vec![
                (created, Some(new_path.clone())),
                (opened[0], Some(other.clone()))
            ]
        );

        // Close without saving; the binding disappears regardless.
        frontend.answer_confirm(false);
        ide.close_current_tab().await.unwrap();
        assert_eq!(ide.tabs().bindings(), vec![(created, Some(new_path))]);
    }

    #[tokio::test]
    async fn test_close_saves_when_confirmed() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, _) = controller(dir.path());

        let path = dir.path().join("keep.ant");
        tokio::fs::write(&path, "old").await.unwrap();
        frontend.queue_open_paths(vec![path.clone()]);
        ide.open_file().await.unwrap();

        ide.insert_text(" edited").unwrap();
        frontend.answer_confirm(true);
        ide.close_current_tab().await.unwrap();

        assert!(ide.tabs().is_empty());
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            " editedold"
        );
    }

    #[tokio::test]
    async fn test_restore_session_reopens_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.ant");
        tokio::fs::write(&file, "return none").await.unwrap();

        let mut config = SessionConfig::defaults_for(dir.path());
        config.open_files = vec![PathBuf::from("main.ant")];
        config.save().await.unwrap();

        let (mut ide, _, _) = controller(dir.path());
        ide.restore_session().await.unwrap();

        assert_eq!(ide.tabs().len(), 1);
        assert_eq!(ide.tabs().open_paths(), vec![file]);
    }

    #[tokio::test]
    async fn test_corrupt_session_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let session_file = SessionConfig::session_file(dir.path());
        tokio::fs::write(&session_file, b"\x80not a session")
            .await
            .unwrap();

        let (mut ide, _, _) = controller(dir.path());
        ide.restore_session().await.unwrap();

        assert!(!session_file.exists());
        assert!(ide.tabs().is_empty());
        assert_eq!(ide.config().editor_font_size, 15);
        assert!(ide.console().text().contains("corrupted"));
    }

    #[tokio::test]
    async fn test_session_referencing_missing_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("here.ant");
        tokio::fs::write(&present, "x").await.unwrap();

        let mut config = SessionConfig::defaults_for(dir.path());
        config.open_files = vec![PathBuf::from("here.ant"), PathBuf::from("gone.ant")];
        config.save().await.unwrap();

        let (mut ide, _, _) = controller(dir.path());
        ide.restore_session().await.unwrap();

        // The tab opened before the failure is closed again.
        assert!(ide.tabs().is_empty());
        assert!(!SessionConfig::session_file(dir.path()).exists());
        assert!(ide.console().text().contains("corrupted"));
    }

    #[tokio::test]
    async fn test_shutdown_persists_open_tabs_relative() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.ant");
        tokio::fs::write(&file, "x").await.unwrap();

        let (mut ide, frontend, _) = controller(dir.path());
        frontend.queue_open_paths(vec![file]);
        ide.open_file().await.unwrap();
        frontend.answer_confirm(false);
        ide.shutdown().await.unwrap();

        let stored = SessionConfig::load(dir.path()).await.unwrap().unwrap();
        assert_eq!(stored.open_files, vec![PathBuf::from("main.ant")]);
    }

    #[tokio::test]
    async fn test_run_without_source_notifies_and_invokes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, runner) = controller(dir.path());

        ide.run(false).await.unwrap();

        let notices = frontend.notices();
        assert_eq!(notices[0].0, "Source Not Set");
        assert!(notices[0].1.contains("AnteaterLang Source"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_with_library_requires_built_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, runner) = controller(dir.path());

        frontend.queue_source_path(dir.path().join("main.ant"));
        ide.set_lang_source();

        ide.run(true).await.unwrap();

        let notices = frontend.notices();
        assert_eq!(notices[0].0, "C Acc Library Not Found");
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compile_without_source_notifies_and_invokes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, runner) = controller(dir.path());

        ide.compile_library().await.unwrap();

        let notices = frontend.notices();
        assert_eq!(notices[0].0, "Source Not Set");
        assert!(notices[0].1.contains("C Acc Library Source"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_load_sample_fills_new_tab() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, _) = controller(dir.path());

        frontend.queue_save_path(dir.path().join("sample.ant"));
        let id = ide.load_sample_lang_source().await.unwrap();

        let tab = ide.tabs().get(id).unwrap();
        assert!(tab.document.text().contains("native_hello_world"));
        // The canned source gets keyword spans straight away.
        assert!(!tab.highlights.is_empty());
    }

    #[tokio::test]
    async fn test_check_ide_version_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let (ide, frontend, _) = controller(dir.path());

        ide.check_ide_version();
        let notices = frontend.notices();
        assert_eq!(notices[0].0, "IDE Version");
        assert!(notices[0].1.contains(crate::VERSION));
    }

    #[tokio::test]
    async fn test_check_language_version_reports_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ide, frontend, runner) = controller(dir.path());

        // RecordingRunner answers with empty stdout: no expected prefix.
        ide.check_language_version();
        assert_eq!(runner.call_count(), 1);
        assert!(ide.language_version().is_none());
        assert_eq!(
            frontend.notices()[0].1,
            "AnteaterLang is not installed/found."
        );
    }
}
