/*!
 * Core types and data structures for the catsel application
 */

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter};

/// Represents the kinds of entries shown in a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Synthetic "." entry for the current directory
    Current,
    /// Synthetic ".." entry for the parent directory
    Parent,
    /// Directory on disk
    Directory,
    /// Anything that is not a directory
    File,
}

/// One item of a directories or files panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name (a bare name, or a root-relative path for search hits)
    pub name: String,
    /// Absolute path the entry refers to
    pub path: PathBuf,
    /// Entry kind
    pub kind: EntryKind,
}

impl Entry {
    pub fn current(path: &Path) -> Self {
        Self {
            name: ".".to_string(),
            path: path.to_path_buf(),
            kind: EntryKind::Current,
        }
    }

    pub fn parent(path: &Path) -> Self {
        Self {
            name: "..".to_string(),
            path: path.to_path_buf(),
            kind: EntryKind::Parent,
        }
    }

    pub fn directory(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
            kind: EntryKind::File,
        }
    }

    /// "." and ".." never take part in selection
    pub fn is_navigation(&self) -> bool {
        matches!(self.kind, EntryKind::Current | EntryKind::Parent)
    }

    /// True for real and synthetic directory entries
    pub fn is_directory(&self) -> bool {
        !matches!(self.kind, EntryKind::File)
    }
}

/// The three panels of the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Panel {
    #[strum(serialize = "directories")]
    Directories,
    #[strum(serialize = "files")]
    Files,
    #[strum(serialize = "preview")]
    Preview,
}

/// Panel changes a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Tab: Directories <-> Files
    Cycle,
    /// Jump straight to a panel
    Jump(Panel),
}

impl Panel {
    /// Transition table for panel focus
    pub fn next(self, command: PanelCommand) -> Panel {
        match (self, command) {
            (_, PanelCommand::Jump(target)) => target,
            (Panel::Directories, PanelCommand::Cycle) => Panel::Files,
            (Panel::Files, PanelCommand::Cycle) => Panel::Directories,
            (Panel::Preview, PanelCommand::Cycle) => Panel::Directories,
        }
    }
}

/// Kind of body written for a file in the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BodyKind {
    /// File content copied verbatim
    #[strum(serialize = "text")]
    Text,
    /// Binary placeholder
    #[strum(serialize = "binary")]
    Binary,
    /// Size ceiling placeholder
    #[strum(serialize = "too large")]
    TooLarge,
    /// Content is not valid UTF-8
    #[strum(serialize = "encoding")]
    Encoding,
    /// Content could not be read
    #[strum(serialize = "error")]
    Unreadable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_panel_transitions() {
        assert_eq!(Panel::Directories.next(PanelCommand::Cycle), Panel::Files);
        assert_eq!(Panel::Files.next(PanelCommand::Cycle), Panel::Directories);
        assert_eq!(Panel::Preview.next(PanelCommand::Cycle), Panel::Directories);

        for from in Panel::iter() {
            for to in Panel::iter() {
                assert_eq!(from.next(PanelCommand::Jump(to)), to);
            }
        }
    }

    #[test]
    fn test_navigation_entries() {
        let root = Path::new("/w");
        assert!(Entry::current(root).is_navigation());
        assert!(Entry::parent(root).is_navigation());
        assert!(!Entry::directory("a", root.join("a")).is_navigation());
        assert!(!Entry::file("b", root.join("b")).is_directory());
    }

    #[test]
    fn test_panel_display() {
        assert_eq!(Panel::Files.to_string(), "files");
        assert_eq!(BodyKind::TooLarge.to_string(), "too large");
    }
}
