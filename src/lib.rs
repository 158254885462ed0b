/*!
 * catsel - Pick files in a workspace and concatenate them into one bundle
 *
 * A session browses a directory tree below a fixed workspace root, keeps a
 * selection of files and directories, searches the workspace by path and
 * exports the selected files as a single delimited text file that can be
 * opened in an editor or copied to the clipboard.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod launcher;
pub mod navigation;
pub mod pathset;
pub mod report;
pub mod search;
pub mod selection;
pub mod session;
pub mod shell;
pub mod types;
pub mod utils;
pub mod walk;


// Re-export main components for easier access
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use config::Config;
pub use error::{CatselError, Result};
pub use export::{ExportBundle, ExportGenerator, ExportRequest};
pub use launcher::{Launcher, SystemLauncher};
pub use navigation::NavigationState;
pub use pathset::PathSet;
pub use report::{ExportReport, FileReportInfo, ReportFormat, Reporter};
pub use search::SearchEngine;
pub use selection::{SelectionCounts, SelectionModel};
pub use session::Session;
pub use shell::Shell;
pub use types::{BodyKind, Entry, EntryKind, Panel, PanelCommand};
pub use utils::format_file_size;
pub use walk::CancellationToken;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
