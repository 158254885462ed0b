/*!
 * Workspace-wide search that temporarily replaces the panel lists
 */

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::types::{Entry, Panel};
use crate::utils::display_relative;
use crate::walk::{walk, CancellationToken, Depth};

/// Default bound on the number of matches a single scan collects
pub const DEFAULT_SEARCH_LIMIT: usize = 5_000;

/// State that lives while search mode is active
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub original_directories: Vec<Entry>,
    pub original_files: Vec<Entry>,
    pub matched_directories: Vec<Entry>,
    pub matched_files: Vec<Entry>,
    /// The last scan stopped at the match limit
    pub truncated: bool,
}

/// Lists to display once search mode ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub directories: Vec<Entry>,
    pub files: Vec<Entry>,
    /// Panel to focus at index 0, if any matched
    pub focus: Option<Panel>,
}

/// Scans the workspace for paths containing the query
#[derive(Debug, Clone)]
pub struct SearchEngine {
    root: PathBuf,
    limit: usize,
    cancel: CancellationToken,
    state: Option<SearchState>,
}

impl SearchEngine {
    pub fn new(root: &Path, limit: usize) -> Self {
        Self {
            root: root.to_path_buf(),
            limit,
            cancel: CancellationToken::new(),
            state: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&SearchState> {
        self.state.as_ref()
    }

    pub fn query(&self) -> &str {
        self.state.as_ref().map_or("", |s| s.query.as_str())
    }

    /// Lists to display while searching
    pub fn visible(&self) -> Option<(&[Entry], &[Entry])> {
        self.state
            .as_ref()
            .map(|s| (s.matched_directories.as_slice(), s.matched_files.as_slice()))
    }

    /// Enter search mode, remembering the lists to restore on cancel
    pub fn activate(&mut self, directories: Vec<Entry>, files: Vec<Entry>) {
        self.state = Some(SearchState {
            query: String::new(),
            matched_directories: directories.clone(),
            matched_files: files.clone(),
            original_directories: directories,
            original_files: files,
            truncated: false,
        });
    }

    pub fn append_char(&mut self, c: char) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.query.push(c);
        self.rescan();
    }

    pub fn backspace(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.query.pop().is_some() {
            self.rescan();
        }
    }

    /// Replace the whole query at once
    pub fn set_query(&mut self, query: &str) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.query != query {
            state.query = query.to_string();
            self.rescan();
        }
    }

    /// Leave search mode and hand back the pre-search lists
    pub fn cancel(&mut self) -> Option<(Vec<Entry>, Vec<Entry>)> {
        self.state
            .take()
            .map(|s| (s.original_directories, s.original_files))
    }

    /// Leave search mode keeping the matches as the working lists
    pub fn commit(&mut self) -> Option<SearchOutcome> {
        let state = self.state.take()?;

        let outcome = if !state.matched_directories.is_empty() {
            SearchOutcome {
                directories: state.matched_directories,
                files: state.matched_files,
                focus: Some(Panel::Directories),
            }
        } else if !state.matched_files.is_empty() {
            SearchOutcome {
                directories: state.matched_directories,
                files: state.matched_files,
                focus: Some(Panel::Files),
            }
        } else {
            SearchOutcome {
                directories: state.original_directories,
                files: state.original_files,
                focus: None,
            }
        };
        Some(outcome)
    }

    fn rescan(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if state.query.is_empty() {
            state.matched_directories = state.original_directories.clone();
            state.matched_files = state.original_files.clone();
            state.truncated = false;
            return;
        }

        let needle = state.query.to_lowercase();
        let mut directories = Vec::new();
        let mut files = Vec::new();
        let limit = self.limit;

        let summary = walk(&self.root, Depth::Recursive, &self.cancel, |entry| {
            let relative = display_relative(&entry.path, &self.root);
            if relative.to_lowercase().contains(&needle) {
                if entry.is_dir {
                    directories.push(Entry::directory(relative, entry.path.clone()));
                } else {
                    files.push(Entry::file(relative, entry.path.clone()));
                }
                if directories.len() + files.len() >= limit {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        });

        state.truncated = summary.stopped;
        if state.truncated {
            info!(query = %state.query, limit, "search stopped at match limit");
        }
        debug!(
            query = %state.query,
            visited = summary.visited,
            directories = directories.len(),
            files = files.len(),
            "search scan finished"
        );

        state.matched_directories = directories;
        state.matched_files = files;
    }
}
