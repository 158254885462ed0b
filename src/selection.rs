/*!
 * Selection state: selected paths, manual overrides and include mode
 *
 * A path is selected when it, or any ancestor, is in the selection set and
 * the path itself carries no manual override. One directory entry therefore
 * covers an arbitrarily deep subtree without listing it.
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::pathset::PathSet;
use crate::types::Entry;
use crate::walk::{collect_directories, collect_files, CancellationToken, Depth};

/// Selection counts as shown in the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCounts {
    pub files: usize,
    pub directories: usize,
}

/// Owns the selection set, the manual overrides and the include-mode flag
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: PathSet,
    manual_override: PathSet,
    include_mode: bool,
    cancel: CancellationToken,
}

impl SelectionModel {
    pub fn new(include_mode: bool) -> Self {
        Self {
            include_mode,
            ..Self::default()
        }
    }

    /// Use `token` to abort the recursive walks this model performs
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn selected(&self) -> &PathSet {
        &self.selected
    }

    pub fn manual_override(&self) -> &PathSet {
        &self.manual_override
    }

    pub fn include_mode(&self) -> bool {
        self.include_mode
    }

    /// Change the flag only; directories already selected are not re-walked
    pub fn set_include_mode(&mut self, enabled: bool) {
        self.include_mode = enabled;
    }

    pub fn toggle_include_mode(&mut self) -> bool {
        self.include_mode = !self.include_mode;
        self.include_mode
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.manual_override.clear();
    }

    /// Effective selection, climbing ancestors
    pub fn is_selected(&self, path: &Path) -> bool {
        self.selected.covers(path) && !self.manual_override.contains(path)
    }

    /// True when a directory itself is in the selection set
    pub fn is_directory_selected(&self, path: &Path) -> bool {
        self.selected.contains(path)
    }

    /// Flip the selection state of a file or directory
    pub fn toggle_item(&mut self, path: &Path, is_directory: bool) {
        if is_directory {
            if self.selected.contains(path) {
                self.deselect_directory(path);
            } else {
                self.select_directory(path);
            }
        } else {
            self.toggle_file(path);
        }
    }

    /// Exclude a path that an ancestor directory would otherwise cover
    pub fn exclude(&mut self, path: &Path) {
        self.selected.remove(path);
        if self.selected.nearest_ancestor(path).is_some() {
            self.manual_override.insert(path);
        }
    }

    /// Select every item in scope, or deselect them all if all are selected
    ///
    /// Navigation entries are ignored.
    pub fn select_all(&mut self, items: &[Entry], is_directory_scope: bool) {
        let scope: Vec<&Entry> = items.iter().filter(|e| !e.is_navigation()).collect();
        if scope.is_empty() {
            return;
        }

        let all_selected = scope
            .iter()
            .all(|e| self.current_state(&e.path, is_directory_scope));

        for entry in scope {
            if self.current_state(&entry.path, is_directory_scope) == all_selected {
                self.toggle_item(&entry.path, is_directory_scope);
            }
        }
    }

    /// Count selected files and directories, deduplicating files
    pub fn count_selected(&self) -> SelectionCounts {
        let depth = Depth::from_include_mode(self.include_mode);
        let mut files: BTreeSet<PathBuf> = BTreeSet::new();
        let mut directories = 0;

        for path in &self.selected {
            let metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "selected path no longer available");
                    continue;
                }
            };

            if metadata.is_dir() {
                directories += 1;
                files.extend(
                    collect_files(path, depth, &self.cancel)
                        .into_iter()
                        .filter(|f| !self.manual_override.contains(f)),
                );
            } else if !self.manual_override.contains(path) {
                files.insert(path.clone());
            }
        }

        SelectionCounts {
            files: files.len(),
            directories,
        }
    }

    fn current_state(&self, path: &Path, is_directory: bool) -> bool {
        if is_directory {
            self.selected.contains(path)
        } else {
            self.is_selected(path)
        }
    }

    fn toggle_file(&mut self, path: &Path) {
        if self.is_selected(path) {
            self.exclude(path);
        } else {
            self.manual_override.remove(path);
            if !self.selected.covers(path) {
                self.selected.insert(path);
            }
        }
    }

    fn select_directory(&mut self, path: &Path) {
        self.selected.insert(path);
        if self.include_mode {
            for dir in collect_directories(path, &self.cancel) {
                self.selected.insert(dir);
            }
        }
        self.manual_override.remove_prefixed(path);
        debug!(path = %path.display(), recursive = self.include_mode, "selected directory");
    }

    fn deselect_directory(&mut self, path: &Path) {
        let selected = self.selected.remove_prefixed(path);
        let overrides = self.manual_override.remove_prefixed(path);
        debug!(path = %path.display(), selected, overrides, "deselected directory");
    }
}
