/*!
 * Directory navigation bounded by the workspace root
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CatselError, Result};
use crate::types::Entry;
use crate::utils::list_subdirectories;

/// A snapshot pushed on descent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub directory: PathBuf,
    pub cursor: usize,
}

/// Current directory, cursor and history
#[derive(Debug, Clone)]
pub struct NavigationState {
    root: PathBuf,
    current: PathBuf,
    cursor: usize,
    scroll_offset: usize,
    history: Vec<HistoryEntry>,
    items: Vec<Entry>,
}

impl NavigationState {
    /// Start navigating at `root`, which becomes the upper boundary
    pub fn new(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|e| CatselError::not_accessible(root, e))?;
        if !root.is_dir() {
            return Err(CatselError::NotADirectory(root));
        }

        let mut state = Self {
            current: root.clone(),
            root,
            cursor: 0,
            scroll_offset: 0,
            history: Vec::new(),
            items: Vec::new(),
        };
        state.refresh();
        Ok(state)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_directory(&self) -> &Path {
        &self.current
    }

    pub fn is_at_root(&self) -> bool {
        self.current == self.root
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Directory panel items: "..", ".", then subdirectories
    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    /// Item under the cursor
    pub fn selected_item(&self) -> Option<&Entry> {
        self.items.get(self.cursor)
    }

    /// Move the cursor, clamping to the item list
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.items.len().saturating_sub(1));
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.set_cursor(target);
    }

    /// Keep the cursor inside a window of `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Resolve a panel item name against the current directory
    pub fn resolve(&self, item: &str) -> PathBuf {
        match item {
            ".." => self
                .current
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.current.clone()),
            "." => self.current.clone(),
            name => self.current.join(name),
        }
    }

    /// Enter `item` ("..", "." or a subdirectory name)
    ///
    /// On error the state is left untouched.
    pub fn enter_directory(&mut self, item: &str) -> Result<()> {
        let target = self.resolve(item);
        self.enter_path(&target)
    }

    /// Enter an absolute directory inside the workspace
    pub fn enter_path(&mut self, path: &Path) -> Result<()> {
        let target = self.check_target(path)?;

        self.history.push(HistoryEntry {
            directory: std::mem::replace(&mut self.current, target),
            cursor: self.cursor,
        });
        self.cursor = 0;
        self.scroll_offset = 0;
        self.refresh();

        debug!(directory = %self.current.display(), depth = self.history.len(), "entered directory");
        Ok(())
    }

    /// Pop one history entry; a no-op at the root or with empty history
    pub fn go_back(&mut self) -> bool {
        if self.is_at_root() {
            return false;
        }
        let Some(previous) = self.history.pop() else {
            return false;
        };

        self.current = previous.directory;
        self.scroll_offset = 0;
        self.refresh();
        self.set_cursor(previous.cursor);

        debug!(directory = %self.current.display(), "went back");
        true
    }

    /// Show `items` in place of the directory listing (search results)
    ///
    /// The next navigation or [`refresh`](Self::refresh) restores the listing.
    pub fn replace_items(&mut self, items: Vec<Entry>, cursor: usize) {
        self.items = items;
        self.scroll_offset = 0;
        self.set_cursor(cursor);
    }

    /// Recompute the item list of the current directory
    pub fn refresh(&mut self) {
        let mut items = Vec::new();
        if !self.is_at_root() {
            let parent = self.resolve("..");
            items.push(Entry::parent(&parent));
        }
        items.push(Entry::current(&self.current));

        match list_subdirectories(&self.current) {
            Ok(names) => items.extend(names.into_iter().map(|name| {
                let path = self.current.join(&name);
                Entry::directory(name, path)
            })),
            Err(e) => debug!(directory = %self.current.display(), error = %e, "cannot list directory"),
        }

        self.items = items;
        if self.cursor >= self.items.len() {
            self.cursor = self.items.len().saturating_sub(1);
        }
    }

    /// Canonicalize and validate a navigation target
    fn check_target(&self, path: &Path) -> Result<PathBuf> {
        let target = fs::canonicalize(path).map_err(|e| CatselError::not_accessible(path, e))?;
        if !target.starts_with(&self.root) {
            return Err(CatselError::OutsideWorkspace(target));
        }
        let metadata = fs::metadata(&target).map_err(|e| CatselError::not_accessible(&target, e))?;
        if !metadata.is_dir() {
            return Err(CatselError::NotADirectory(target));
        }
        fs::read_dir(&target).map_err(|e| CatselError::not_accessible(&target, e))?;
        Ok(target)
    }
}
