/*!
 * Configuration handling for catsel
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::export::DEFAULT_MAX_FILE_SIZE;
use crate::search::DEFAULT_SEARCH_LIMIT;

/// Command-line arguments for catsel
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "catsel",
    version = env!("CARGO_PKG_VERSION"),
    about = "Select files in a workspace and concatenate them into one text bundle",
    long_about = "Browse a directory tree from a fixed workspace root, mark files and directories, and export their contents as a single delimited text file that can be opened in an editor or copied to the clipboard."
)]
pub struct Args {
    /// Workspace root to browse
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Start with include mode on (directories select their whole subtree)
    #[clap(long)]
    pub include: bool,

    /// Largest file, in bytes, whose content goes into a bundle
    #[clap(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Maximum number of matches collected per search
    #[clap(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub search_limit: usize,

    /// Directory bundles are written to (defaults to the workspace root)
    #[clap(long)]
    pub output_dir: Option<String>,

    /// Show a progress bar while exporting
    #[clap(long)]
    pub progress: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Workspace root
    pub workspace_root: PathBuf,

    /// Initial include mode
    pub include_mode: bool,

    /// Size ceiling for exported content
    pub max_file_size: u64,

    /// Match bound for search scans
    pub search_limit: usize,

    /// Where bundles go; `None` means the workspace root
    pub output_dir: Option<PathBuf>,

    /// Show export progress
    pub show_progress: bool,

    /// Debug logging
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            include_mode: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
            output_dir: None,
            show_progress: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            workspace_root: PathBuf::from(args.directory_path),
            include_mode: args.include,
            max_file_size: args.max_file_size,
            search_limit: args.search_limit,
            output_dir: args.output_dir.map(PathBuf::from),
            show_progress: args.progress,
            verbose: args.verbose,
        }
    }

    /// Configuration for a workspace with default settings
    pub fn for_workspace(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.workspace_root.is_dir() {
            crate::bail!(
                Config,
                "Workspace directory not found: {}",
                self.workspace_root.display()
            );
        }

        if let Some(dir) = &self.output_dir {
            crate::ensure!(
                dir.is_dir(),
                Config,
                "Output directory not found: {}",
                dir.display()
            );
        }

        crate::ensure!(
            self.max_file_size > 0,
            InvalidArgument,
            "--max-file-size must be at least 1"
        );
        crate::ensure!(
            self.search_limit > 0,
            InvalidArgument,
            "--search-limit must be at least 1"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatselError;
    use tempfile::tempdir;

    #[test]
    fn test_from_args() {
        let args = Args::parse_from(["catsel", "some/dir", "--include", "--search-limit", "10"]);
        let config = Config::from_args(args);
        assert_eq!(config.workspace_root, PathBuf::from("some/dir"));
        assert!(config.include_mode);
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_default_directory_is_cwd() {
        let config = Config::from_args(Args::parse_from(["catsel"]));
        assert_eq!(config.workspace_root, PathBuf::from("."));
        assert!(!config.include_mode);
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().unwrap();
        assert!(Config::for_workspace(dir.path()).validate().is_ok());

        let missing = Config::for_workspace(dir.path().join("missing"));
        assert!(matches!(missing.validate(), Err(CatselError::Config(_))));

        let mut bad_output = Config::for_workspace(dir.path());
        bad_output.output_dir = Some(dir.path().join("nope"));
        assert!(bad_output.validate().is_err());

        let mut zero = Config::for_workspace(dir.path());
        zero.search_limit = 0;
        assert!(matches!(zero.validate(), Err(CatselError::InvalidArgument(_))));
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        let err = Args::try_parse_from(["catsel", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        let err = Args::try_parse_from(["catsel", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
