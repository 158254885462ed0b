/*!
 * One browsing session: navigation, selection, search and export wired together
 *
 * Every user command is a method on [`Session`]; nothing is global, so a
 * front end (the line shell, a TUI, tests) just owns a session and calls it.
 */

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{CatselError, Result};
use crate::export::{bundle_text, ExportBundle, ExportGenerator, ExportRequest, BINARY_PLACEHOLDER};
use crate::launcher::Launcher;
use crate::navigation::NavigationState;
use crate::search::SearchEngine;
use crate::selection::{SelectionCounts, SelectionModel};
use crate::types::{Entry, EntryKind, Panel, PanelCommand};
use crate::utils::{is_binary_file, list_files, list_subdirectories};
use crate::walk::CancellationToken;

/// Lines shown when previewing a text file
const PREVIEW_LINES: usize = 50;

/// Width preview lines are cut to
const PREVIEW_WIDTH: usize = 80;

/// Session state owned by the front end for the process lifetime
pub struct Session {
    nav: NavigationState,
    selection: SelectionModel,
    search: SearchEngine,
    exporter: ExportGenerator,
    cancel: CancellationToken,
    panel: Panel,
    /// Panels show committed search matches instead of the listing
    showing_matches: bool,
    files: Vec<Entry>,
    file_cursor: usize,
    preview_offset: usize,
    status: Option<String>,
}

impl Session {
    /// Open a session rooted at the configured workspace
    pub fn new(config: &Config) -> Result<Self> {
        let nav = NavigationState::new(&config.workspace_root)?;
        let cancel = CancellationToken::new();
        let search =
            SearchEngine::new(nav.root(), config.search_limit).with_cancellation(cancel.clone());
        let exporter = ExportGenerator::default()
            .with_output_dir(config.output_dir.clone())
            .with_max_file_size(config.max_file_size)
            .with_cancellation(cancel.clone());

        let mut session = Self {
            nav,
            selection: SelectionModel::new(config.include_mode).with_cancellation(cancel.clone()),
            search,
            exporter,
            cancel,
            panel: Panel::Directories,
            showing_matches: false,
            files: Vec::new(),
            file_cursor: 0,
            preview_offset: 0,
            status: None,
        };
        session.sync_files();
        Ok(session)
    }

    /// Replace the export generator (progress bar, limits)
    pub fn with_exporter(mut self, exporter: ExportGenerator) -> Self {
        self.exporter = exporter.with_cancellation(self.cancel.clone());
        self
    }

    /// Token shared by every walk this session starts
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    //--------------------------------------------------------------------
    // Accessors
    //--------------------------------------------------------------------

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn file_cursor(&self) -> usize {
        self.file_cursor
    }

    pub fn preview_offset(&self) -> usize {
        self.preview_offset
    }

    /// Directories panel items, search matches while searching
    pub fn directory_items(&self) -> &[Entry] {
        match self.search.visible() {
            Some((directories, _)) => directories,
            None => self.nav.items(),
        }
    }

    /// Files panel items, search matches while searching
    pub fn file_items(&self) -> &[Entry] {
        match self.search.visible() {
            Some((_, files)) => files,
            None => &self.files,
        }
    }

    /// Entry under the cursor of the focused list
    pub fn current_entry(&self) -> Option<&Entry> {
        match self.panel {
            Panel::Directories => self.nav.selected_item(),
            Panel::Files | Panel::Preview => self.files.get(self.file_cursor),
        }
    }

    pub fn counts(&self) -> SelectionCounts {
        self.selection.count_selected()
    }

    pub fn is_selected(&self, entry: &Entry) -> bool {
        match entry.kind {
            EntryKind::Parent => false,
            EntryKind::Current | EntryKind::Directory => self.selection.is_directory_selected(&entry.path),
            EntryKind::File => self.selection.is_selected(&entry.path),
        }
    }

    //--------------------------------------------------------------------
    // Cursor and panels
    //--------------------------------------------------------------------

    pub fn move_cursor(&mut self, delta: isize) {
        match self.panel {
            Panel::Directories => {
                self.nav.move_cursor(delta);
                self.sync_files();
            }
            Panel::Files => {
                let last = self.files.len().saturating_sub(1);
                self.file_cursor = self.file_cursor.saturating_add_signed(delta).min(last);
                self.preview_offset = 0;
            }
            Panel::Preview => {
                let last = self.preview_lines().len().saturating_sub(1);
                self.preview_offset = self.preview_offset.saturating_add_signed(delta).min(last);
            }
        }
    }

    /// Keep the directories cursor inside a window of `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        self.nav.scroll_into_view(height);
    }

    /// Apply a panel transition
    pub fn switch_panel(&mut self, command: PanelCommand) {
        let next = self.panel.next(command);
        if next == self.panel {
            return;
        }
        if next == Panel::Files && self.panel == Panel::Directories {
            self.sync_files();
        }
        self.panel = next;
        self.preview_offset = 0;
    }

    /// Enter the highlighted directory, or open the preview of a file
    pub fn enter(&mut self) {
        match self.panel {
            Panel::Directories => {
                let Some(entry) = self.nav.selected_item().cloned() else {
                    return;
                };
                let result = match entry.kind {
                    EntryKind::Current => Ok(()),
                    EntryKind::Parent => self.ascend(),
                    EntryKind::Directory | EntryKind::File => self.nav.enter_path(&entry.path),
                };
                if result.is_ok() && entry.kind != EntryKind::Current {
                    self.showing_matches = false;
                }
                self.ignore_silent(result);
                self.sync_files();
            }
            Panel::Files => {
                if !self.files.is_empty() {
                    self.switch_panel(PanelCommand::Jump(Panel::Preview));
                }
            }
            Panel::Preview => {}
        }
    }

    /// Escape: leave the preview, drop search matches, or go back one
    /// history step
    pub fn back(&mut self) {
        match self.panel {
            Panel::Preview => self.switch_panel(PanelCommand::Jump(Panel::Files)),
            Panel::Directories | Panel::Files if self.showing_matches => {
                self.restore_listing();
            }
            Panel::Directories | Panel::Files => {
                if self.nav.go_back() {
                    self.sync_files();
                }
            }
        }
    }

    /// Put the directory listing back in place of search matches
    fn restore_listing(&mut self) {
        self.showing_matches = false;
        let cursor = self.nav.cursor();
        self.nav.refresh();
        self.nav.set_cursor(cursor);
        self.sync_files();
    }

    /// Ascend through history when it leads to the parent, else by path
    fn ascend(&mut self) -> Result<()> {
        let parent = self.nav.resolve("..");
        let history_leads_up = self
            .nav
            .history()
            .last()
            .map_or(false, |h| h.directory == parent);

        if history_leads_up && self.nav.go_back() {
            Ok(())
        } else {
            self.nav.enter_path(&parent)
        }
    }

    //--------------------------------------------------------------------
    // Selection
    //--------------------------------------------------------------------

    /// Toggle the entry under the cursor
    pub fn toggle_current(&mut self) {
        let Some(entry) = self.current_entry().cloned() else {
            return;
        };
        match entry.kind {
            EntryKind::Parent => {}
            EntryKind::Current | EntryKind::Directory => {
                if fs::metadata(&entry.path).map_or(false, |m| m.is_dir()) {
                    self.selection.toggle_item(&entry.path, true);
                } else {
                    debug!(path = %entry.path.display(), "directory vanished, ignoring toggle");
                }
            }
            EntryKind::File => self.selection.toggle_item(&entry.path, false),
        }
    }

    /// Select or deselect every item of the focused list
    pub fn select_all(&mut self) {
        match self.panel {
            Panel::Directories => {
                let items = self.nav.items().to_vec();
                self.selection.select_all(&items, true);
            }
            Panel::Files | Panel::Preview => {
                let items = self.files.clone();
                self.selection.select_all(&items, false);
            }
        }
    }

    pub fn toggle_include_mode(&mut self) -> bool {
        let enabled = self.selection.toggle_include_mode();
        self.set_status(if enabled {
            "Subdirectories: included"
        } else {
            "Subdirectories: not included"
        });
        enabled
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.set_status("Selection cleared");
    }

    //--------------------------------------------------------------------
    // Search
    //--------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.search
            .activate(self.nav.items().to_vec(), self.files.clone());
    }

    pub fn search_input(&mut self, c: char) {
        self.search.append_char(c);
    }

    pub fn search_backspace(&mut self) {
        self.search.backspace();
    }

    /// Run a whole query in one go (activating search if needed)
    pub fn search_for(&mut self, query: &str) {
        if !self.search.is_active() {
            self.start_search();
        }
        self.search.set_query(query);
    }

    pub fn cancel_search(&mut self) {
        if let Some((directories, files)) = self.search.cancel() {
            let cursor = self.nav.cursor();
            self.nav.replace_items(directories, cursor);
            self.files = files;
            self.file_cursor = self.file_cursor.min(self.files.len().saturating_sub(1));
        }
    }

    pub fn commit_search(&mut self) {
        let Some(outcome) = self.search.commit() else {
            return;
        };

        // Only directory matches replace the listing
        if outcome.focus == Some(Panel::Directories) {
            self.nav.replace_items(outcome.directories, 0);
        } else {
            self.nav.refresh();
        }
        self.showing_matches = outcome.focus.is_some();
        self.files = outcome.files;
        self.file_cursor = 0;
        match outcome.focus {
            Some(panel) => self.panel = panel,
            None => self.set_status("No matches"),
        }
    }

    //--------------------------------------------------------------------
    // Export
    //--------------------------------------------------------------------

    /// Write a bundle of the current selection
    pub fn export(&self) -> Result<ExportBundle> {
        let request = ExportRequest {
            selected: self.selection.selected(),
            excluded: self.selection.manual_override(),
            include_mode: self.selection.include_mode(),
            workspace_root: self.nav.root(),
            current_directory: self.nav.current_directory(),
        };
        self.exporter.generate(&request)
    }

    /// Export and hand the bundle to an external application
    ///
    /// The bundle stays on disk for the application to read.
    pub fn export_and_open(&mut self, launcher: &dyn Launcher) -> Result<ExportBundle> {
        let outcome = self.export().and_then(|bundle| {
            launcher.open(&bundle.path)?;
            Ok(bundle)
        });

        match &outcome {
            Ok(bundle) => self.set_status(format!("Opened {}", file_name(&bundle.path))),
            Err(e) => self.report_failure(e),
        }
        outcome
    }

    /// Export, copy the bundle text to the clipboard and delete the file
    pub fn export_and_copy(&mut self, clipboard: &dyn Clipboard) -> Result<ExportBundle> {
        let outcome = self.export().and_then(|bundle| {
            let text = bundle_text(&bundle.path)?;
            clipboard.copy_to_clipboard(&text)?;
            if let Err(e) = fs::remove_file(&bundle.path) {
                warn!(bundle = %bundle.path.display(), error = %e, "could not delete copied bundle");
            }
            Ok(bundle)
        });

        match &outcome {
            Ok(bundle) => self.set_status(format!("Copied {} files to clipboard", bundle.files.len())),
            Err(e) => self.report_failure(e),
        }
        outcome
    }

    //--------------------------------------------------------------------
    // Preview
    //--------------------------------------------------------------------

    /// Preview of the highlighted item
    ///
    /// Directories show their subdirectories with a selection marker,
    /// files show their first lines.
    pub fn preview_lines(&self) -> Vec<String> {
        match self.panel {
            Panel::Directories => match self.nav.selected_item() {
                Some(entry) => self.directory_preview(&entry.path),
                None => Vec::new(),
            },
            Panel::Files | Panel::Preview => match self.files.get(self.file_cursor) {
                Some(entry) => file_preview(&entry.path),
                None => vec!["No file selected".to_string()],
            },
        }
    }

    fn directory_preview(&self, dir: &Path) -> Vec<String> {
        match list_subdirectories(dir) {
            Ok(names) => names
                .into_iter()
                .map(|name| {
                    let marker = if self.selection.is_selected(&dir.join(&name)) {
                        '*'
                    } else {
                        ' '
                    };
                    format!("{} {}/", marker, name)
                })
                .collect(),
            Err(e) => vec![format!("Error accessing directory: {}", e)],
        }
    }

    //--------------------------------------------------------------------
    // Internals
    //--------------------------------------------------------------------

    /// Recompute the files panel for the highlighted directory
    fn sync_files(&mut self) {
        let dir = self
            .nav
            .selected_item()
            .filter(|e| e.is_directory())
            .map(|e| e.path.clone())
            .unwrap_or_else(|| self.nav.current_directory().to_path_buf());
        self.files = list_files(&dir);
        self.file_cursor = 0;
        self.preview_offset = 0;
    }

    fn ignore_silent(&mut self, result: Result<()>) {
        if let Err(e) = result {
            if e.is_silent() {
                debug!(error = %e, "command ignored");
            } else {
                self.report_failure(&e);
            }
        }
    }

    fn report_failure(&mut self, error: &CatselError) {
        let message = match error {
            CatselError::ExportEmpty => "Nothing selected to export".to_string(),
            CatselError::ClipboardUnavailable(e) => format!("Clipboard unavailable: {}", e),
            CatselError::OpenFailed { reason, .. } => format!("Could not open bundle: {}", reason),
            other => other.to_string(),
        };
        self.set_status(message);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(status = %message);
        self.status = Some(message);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// First lines of a text file, cut to the preview width
fn file_preview(path: &Path) -> Vec<String> {
    match is_binary_file(path) {
        Ok(true) => return vec![BINARY_PLACEHOLDER.to_string()],
        Ok(false) => {}
        Err(e) => return vec![format!("Error reading file: {}", e)],
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return vec![format!("Error reading file: {}", e)],
    };
    let text = String::from_utf8_lossy(&bytes);

    let mut lines: Vec<String> = text
        .lines()
        .take(PREVIEW_LINES)
        .map(|line| {
            let clean: String = line
                .chars()
                .map(|c| if c.is_control() && c != '\t' { ' ' } else { c })
                .collect();
            if clean.chars().count() > PREVIEW_WIDTH {
                let cut: String = clean.chars().take(PREVIEW_WIDTH - 3).collect();
                format!("{}...", cut)
            } else {
                clean
            }
        })
        .collect();
    if text.lines().nth(PREVIEW_LINES).is_some() {
        lines.push("...".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    use crate::clipboard::ClipboardError;

    #[derive(Default)]
    struct FakeClipboard {
        copied: RefCell<Option<String>>,
        fail: bool,
    }

    impl Clipboard for FakeClipboard {
        fn copy_to_clipboard(&self, text: &str) -> crate::clipboard::Result<()> {
            if self.fail {
                return Err(ClipboardError::NoClipboardFound);
            }
            *self.copied.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLauncher {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl Launcher for FakeLauncher {
        fn open(&self, path: &Path) -> Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn fixture() -> (tempfile::TempDir, Session) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("proj/sub")).unwrap();
        fs::write(dir.path().join("proj/a.txt"), "hello\n").unwrap();
        fs::write(dir.path().join("proj/sub/b.txt"), "world").unwrap();
        fs::write(dir.path().join("top.txt"), "top\n").unwrap();
        let session = Session::new(&Config::for_workspace(dir.path())).unwrap();
        (dir, session)
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn highlight(session: &mut Session, name: &str) {
        let index = session
            .directory_items()
            .iter()
            .position(|e| e.name == name)
            .unwrap();
        session.nav.set_cursor(index);
        session.sync_files();
    }

    #[test]
    fn test_files_follow_highlighted_directory() {
        let (_dir, mut session) = fixture();
        assert_eq!(names(session.file_items()), vec!["top.txt"]);
        session.move_cursor(1);
        assert_eq!(names(session.file_items()), vec!["a.txt"]);
    }

    #[test]
    fn test_enter_and_parent_entry() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, "proj");
        session.enter();
        assert_eq!(names(session.directory_items()), vec!["..", ".", "sub"]);

        // ".." walks back through history, restoring the cursor
        session.nav.set_cursor(0);
        session.enter();
        assert!(session.navigation().is_at_root());
        assert_eq!(session.navigation().cursor(), 1);
        assert!(session.navigation().history().is_empty());
    }

    #[test]
    fn test_panel_switching() {
        let (_dir, mut session) = fixture();
        session.switch_panel(PanelCommand::Cycle);
        assert_eq!(session.panel(), Panel::Files);
        session.enter();
        assert_eq!(session.panel(), Panel::Preview);
        assert_eq!(session.preview_lines(), vec!["top"]);
        session.back();
        assert_eq!(session.panel(), Panel::Files);
        session.switch_panel(PanelCommand::Cycle);
        assert_eq!(session.panel(), Panel::Directories);
    }

    #[test]
    fn test_toggle_and_counts() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, "proj");
        session.toggle_current();
        assert_eq!(
            session.counts(),
            SelectionCounts {
                files: 1,
                directories: 1
            }
        );

        // Deselect a.txt from the files panel
        session.switch_panel(PanelCommand::Jump(Panel::Files));
        session.toggle_current();
        assert_eq!(session.counts().files, 0);
        assert!(!session.is_selected(&session.file_items()[0].clone()));
    }

    #[test]
    fn test_select_all_directories_skips_navigation_entries() {
        let (_dir, mut session) = fixture();
        session.select_all();
        let root = session.navigation().root().to_path_buf();
        assert_eq!(session.selection().selected().to_vec(), vec![root.join("proj")]);
    }

    #[test]
    fn test_cancelled_session_walks_nothing() {
        let (_dir, mut session) = fixture();
        session.cancellation().cancel();
        session.search_for("txt");
        assert!(session.file_items().is_empty());

        highlight(&mut session, "proj");
        session.toggle_current();
        assert_eq!(session.counts().files, 0);
    }

    #[test]
    fn test_include_mode_status() {
        let (_dir, mut session) = fixture();
        assert!(session.toggle_include_mode());
        assert_eq!(session.status(), Some("Subdirectories: included"));
    }

    #[test]
    fn test_search_commit_and_enter_result() {
        let (_dir, mut session) = fixture();
        session.search_for("sub");
        assert_eq!(names(session.directory_items()), vec!["proj/sub"]);
        session.commit_search();
        assert_eq!(session.panel(), Panel::Directories);
        assert_eq!(names(session.directory_items()), vec!["proj/sub"]);

        session.enter();
        let root = session.navigation().root().to_path_buf();
        assert_eq!(session.navigation().current_directory(), root.join("proj/sub"));
        assert_eq!(names(session.directory_items()), vec!["..", "."]);
    }

    #[test]
    fn test_file_only_matches_keep_directory_listing() {
        let (_dir, mut session) = fixture();
        let listing = session.directory_items().to_vec();

        session.search_for("top");
        session.commit_search();
        assert_eq!(session.panel(), Panel::Files);
        assert_eq!(names(session.file_items()), vec!["top.txt"]);
        assert_eq!(session.directory_items(), listing.as_slice());

        session.back();
        assert_eq!(session.directory_items(), listing.as_slice());
        assert_eq!(names(session.file_items()), vec!["top.txt"]);
        session.switch_panel(PanelCommand::Jump(Panel::Directories));
        session.move_cursor(1);
        assert_eq!(names(session.file_items()), vec!["a.txt"]);

        // An empty search afterwards restores the same listing
        session.search_for("");
        session.commit_search();
        assert_eq!(session.directory_items(), listing.as_slice());
    }

    #[test]
    fn test_back_drops_directory_matches() {
        let (_dir, mut session) = fixture();
        let listing = session.directory_items().to_vec();

        session.search_for("sub");
        session.commit_search();
        assert_eq!(names(session.directory_items()), vec!["proj/sub"]);

        session.back();
        assert_eq!(session.directory_items(), listing.as_slice());
        assert!(session.navigation().is_at_root());
    }

    #[test]
    fn test_search_cancel_restores_lists() {
        let (_dir, mut session) = fixture();
        let dirs = session.directory_items().to_vec();
        let files = session.file_items().to_vec();
        session.start_search();
        session.search_input('z');
        session.search_input('q');
        assert!(session.directory_items().is_empty());
        session.cancel_search();
        assert_eq!(session.directory_items(), dirs.as_slice());
        assert_eq!(session.file_items(), files.as_slice());
    }

    #[test]
    fn test_export_and_copy_deletes_bundle() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, "proj");
        session.toggle_current();

        let clipboard = FakeClipboard::default();
        let bundle = session.export_and_copy(&clipboard).unwrap();
        assert!(!bundle.path.exists());
        let copied = clipboard.copied.borrow().clone().unwrap();
        assert!(copied.contains("// File proj/a.txt\nhello\n// End of file proj/a.txt\n"));
        assert_eq!(session.status(), Some("Copied 1 files to clipboard"));
    }

    #[test]
    fn test_failed_copy_keeps_bundle_and_reports() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, "proj");
        session.toggle_current();

        let clipboard = FakeClipboard {
            fail: true,
            ..FakeClipboard::default()
        };
        let err = session.export_and_copy(&clipboard).unwrap_err();
        assert!(matches!(err, CatselError::ClipboardUnavailable(_)));
        assert!(session.status().unwrap().starts_with("Clipboard unavailable"));
    }

    #[test]
    fn test_export_and_open_keeps_bundle() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, "proj");
        session.toggle_current();

        let launcher = FakeLauncher::default();
        let bundle = session.export_and_open(&launcher).unwrap();
        assert!(bundle.path.exists());
        assert_eq!(launcher.opened.borrow().as_slice(), &[bundle.path.clone()]);
        let name = bundle.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("cs_") && name.ends_with(".txt"));
    }

    #[test]
    fn test_export_nothing_selected() {
        let (dir, mut session) = fixture();
        let launcher = FakeLauncher::default();
        let err = session.export_and_open(&launcher).unwrap_err();
        assert!(matches!(err, CatselError::ExportEmpty));
        assert_eq!(session.status(), Some("Nothing selected to export"));
        assert!(launcher.opened.borrow().is_empty());

        let bundles: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("cs_"))
            .collect();
        assert!(bundles.is_empty());
    }

    #[test]
    fn test_directory_preview_marks_selection() {
        let (_dir, mut session) = fixture();
        highlight(&mut session, ".");
        let root = session.navigation().root().to_path_buf();
        session.selection.toggle_item(&root.join("proj"), true);
        assert_eq!(session.preview_lines(), vec!["* proj/"]);
    }

    #[test]
    fn test_file_preview_truncates() {
        let dir = tempdir().unwrap();
        let long = dir.path().join("long.txt");
        let body: String = (0..60).map(|i| format!("{}{}\n", i, "x".repeat(100))).collect();
        fs::write(&long, body).unwrap();

        let lines = file_preview(&long);
        assert_eq!(lines.len(), PREVIEW_LINES + 1);
        assert!(lines[0].ends_with("..."));
        assert_eq!(lines[0].chars().count(), PREVIEW_WIDTH);
        assert_eq!(lines.last().unwrap(), "...");
    }
}
