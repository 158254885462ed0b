/*!
 * Depth-first directory traversal with a visitor and cancellation
 *
 * Every recursive walk in the crate (include-mode selection, counting,
 * search and export) goes through [`walk`], so a caller can bound it,
 * cancel it from another thread, or stop early from the visitor.
 */

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

/// Shared flag used to abort a running walk
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// How far below the root a walk descends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Immediate children only
    Shallow,
    /// The whole subtree
    Recursive,
}

impl Depth {
    pub fn from_include_mode(include_mode: bool) -> Self {
        if include_mode {
            Depth::Recursive
        } else {
            Depth::Shallow
        }
    }
}

/// An entry handed to the visitor
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Absolute path
    pub path: PathBuf,
    /// Depth below the walk root, starting at 1
    pub depth: usize,
    /// Whether the entry is a directory (links are not followed)
    pub is_dir: bool,
}

/// Result of a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Entries handed to the visitor
    pub visited: usize,
    /// Entries skipped because they could not be read
    pub skipped: usize,
    /// True if the walk ended because of the token or the visitor
    pub stopped: bool,
}

/// Walk the descendants of `root` depth first, in file name order
///
/// The root itself is not visited. Unreadable entries are logged and
/// skipped. The visitor returns `ControlFlow::Break` to stop the walk.
pub fn walk<F>(root: &Path, depth: Depth, cancel: &CancellationToken, mut visit: F) -> WalkSummary
where
    F: FnMut(&WalkEntry) -> ControlFlow<()>,
{
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if depth == Depth::Shallow {
        walker = walker.max_depth(1);
    }

    let mut summary = WalkSummary::default();
    for entry in walker {
        if cancel.is_cancelled() {
            debug!(root = %root.display(), "walk cancelled");
            summary.stopped = true;
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                summary.skipped += 1;
                continue;
            }
        };

        let item = WalkEntry {
            is_dir: entry.file_type().is_dir(),
            depth: entry.depth(),
            path: entry.into_path(),
        };
        summary.visited += 1;

        if visit(&item).is_break() {
            summary.stopped = true;
            break;
        }
    }

    summary
}

/// Collect the non-directory entries under `root`
pub fn collect_files(root: &Path, depth: Depth, cancel: &CancellationToken) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, depth, cancel, |entry| {
        if !entry.is_dir {
            files.push(entry.path.clone());
        }
        ControlFlow::Continue(())
    });
    files
}

/// Collect every directory under `root`
pub fn collect_directories(root: &Path, cancel: &CancellationToken) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    walk(root, Depth::Recursive, cancel, |entry| {
        if entry.is_dir {
            dirs.push(entry.path.clone());
        }
        ControlFlow::Continue(())
    });
    dirs
}
