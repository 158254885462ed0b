/*!
 * Bundle export: resolve the selection to files and concatenate them
 */

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{CatselError, Result};
use crate::pathset::PathSet;
use crate::report::{ExportReport, FileReportInfo};
use crate::types::BodyKind;
use crate::utils::{display_relative, format_file_size, is_binary_file};
use crate::walk::{collect_files, CancellationToken, Depth};

/// Line written before every file block
pub const SEPARATOR: &str = "---------------------------------------------";

/// Largest file copied into a bundle
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Body written for binary files
pub const BINARY_PLACEHOLDER: &str = "[Binary file, preview unavailable]";

/// Body written for content that is not valid UTF-8
pub const ENCODING_PLACEHOLDER: &str = "[Binary file or incompatible encoding]";

/// Number of hex digits kept from the fingerprint digest
const FINGERPRINT_LEN: usize = 8;

/// Salted names tried before giving up on a free bundle name
const NAME_ATTEMPTS: u32 = 16;

/// Everything the generator reads from the session
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub selected: &'a PathSet,
    pub excluded: &'a PathSet,
    pub include_mode: bool,
    pub workspace_root: &'a Path,
    /// Only used for the display names in block headers
    pub current_directory: &'a Path,
}

/// A written bundle
#[derive(Debug, Clone)]
pub struct ExportBundle {
    /// Path of the bundle file
    pub path: PathBuf,
    /// Files in the order they were written
    pub files: Vec<PathBuf>,
    /// Statistics for the report table
    pub report: ExportReport,
}

/// Generator for export bundles
pub struct ExportGenerator {
    /// Directory the bundle is written to (defaults to the workspace root)
    output_dir: Option<PathBuf>,
    /// Size ceiling for copied content
    max_file_size: u64,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    cancel: CancellationToken,
}

impl Default for ExportGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ProgressBar::hidden()))
    }
}

impl ExportGenerator {
    /// Create a new generator
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self {
            output_dir: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            progress,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Resolve the request to a sorted, deduplicated list of files
    pub fn resolve_files(&self, request: &ExportRequest<'_>) -> Vec<PathBuf> {
        let depth = Depth::from_include_mode(request.include_mode);
        let mut files = BTreeSet::new();

        for path in request.selected {
            if request.excluded.contains(path) {
                continue;
            }

            let metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unavailable selection");
                    continue;
                }
            };

            if metadata.is_dir() {
                files.extend(
                    collect_files(path, depth, &self.cancel)
                        .into_iter()
                        .filter(|f| !request.excluded.contains(f)),
                );
            } else {
                files.insert(path.clone());
            }
        }

        // BTreeSet iteration gives the sorted order
        files.into_iter().collect()
    }

    /// Write the bundle for `request` and return where it went
    pub fn generate(&self, request: &ExportRequest<'_>) -> Result<ExportBundle> {
        let start_time = Instant::now();
        let files = self.resolve_files(request);
        if files.is_empty() {
            return Err(CatselError::ExportEmpty);
        }

        let now = Local::now();
        let timestamp = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros());
        let output_dir = self.output_dir.as_deref().unwrap_or(request.workspace_root);
        let (path, file) = create_bundle_file(output_dir, timestamp, request.selected)?;

        self.progress.set_length(files.len() as u64);
        self.progress.set_position(0);
        self.progress.set_prefix("📦 Exporting");

        let mut writer = BufWriter::new(file);
        let details = self.write_bundle(&files, request.current_directory, &mut writer)?;
        writer.flush()?;

        self.progress.finish_and_clear();

        let report = ExportReport::new(path.display().to_string(), start_time.elapsed(), details);
        info!(
            bundle = %path.display(),
            files = files.len(),
            "export finished"
        );

        Ok(ExportBundle {
            path,
            files,
            report,
        })
    }

    /// Serialize `files` as bundle blocks into `out`
    pub fn write_bundle<W: Write>(
        &self,
        files: &[PathBuf],
        current_directory: &Path,
        out: &mut W,
    ) -> io::Result<Vec<(String, FileReportInfo)>> {
        let mut details = Vec::with_capacity(files.len());

        for path in files {
            let name = display_relative(path, current_directory);
            self.progress.set_message(format!("Current file: {}", name));

            writeln!(out, "{}", SEPARATOR)?;
            writeln!(out, "// File {}", name)?;
            let info = self.write_body(path, out)?;
            writeln!(out, "// End of file {}", name)?;
            writeln!(out)?;

            self.progress.inc(1);
            details.push((name, info));
        }

        Ok(details)
    }

    /// Write one file body, newline terminated, or a placeholder line
    fn write_body<W: Write>(&self, path: &Path, out: &mut W) -> io::Result<FileReportInfo> {
        let content = match self.read_body(path) {
            Ok(Body::Content(content)) => content,
            Ok(Body::Placeholder(kind, line)) => {
                writeln!(out, "{}", line)?;
                return Ok(FileReportInfo::placeholder(kind));
            }
            Err(e) => {
                debug!(error = %e, "unreadable file in export");
                let reason = match &e {
                    CatselError::ReadFailure { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                writeln!(out, "[Error reading file: {}]", reason)?;
                return Ok(FileReportInfo::placeholder(BodyKind::Unreadable));
            }
        };

        out.write_all(content.as_bytes())?;
        if !content.is_empty() && !content.ends_with('\n') {
            writeln!(out)?;
        }

        Ok(FileReportInfo::for_text(&content))
    }

    fn read_body(&self, path: &Path) -> Result<Body> {
        let read_failure = |source| CatselError::ReadFailure {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(read_failure)?;
        if metadata.len() > self.max_file_size {
            return Ok(Body::Placeholder(
                BodyKind::TooLarge,
                format!(
                    "[File too large, preview unavailable. Size: {}]",
                    format_file_size(metadata.len())
                ),
            ));
        }

        if is_binary_file(path).map_err(read_failure)? {
            return Ok(Body::Placeholder(BodyKind::Binary, BINARY_PLACEHOLDER.to_string()));
        }

        let bytes = fs::read(path).map_err(read_failure)?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Body::Content(content)),
            Err(_) => Ok(Body::Placeholder(
                BodyKind::Encoding,
                ENCODING_PLACEHOLDER.to_string(),
            )),
        }
    }
}

enum Body {
    Content(String),
    Placeholder(BodyKind, String),
}

/// Create a fresh `cs_<fingerprint>.txt`, never reusing an existing file
fn create_bundle_file(dir: &Path, timestamp: i64, selected: &PathSet) -> io::Result<(PathBuf, File)> {
    for salt in 0..NAME_ATTEMPTS {
        let path = dir.join(format!("cs_{}.txt", fingerprint(timestamp, selected, salt)));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(bundle = %path.display(), "bundle name taken, salting");
            }
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free bundle name in {}", dir.display()),
    ))
}

/// Short hex digest of the export time and the sorted selection
///
/// A non-zero `salt` is mixed in to move off a name that is already taken.
pub fn fingerprint(timestamp: i64, selected: &PathSet, salt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(timestamp.to_string().as_bytes());
    if salt > 0 {
        hasher.update(salt.to_le_bytes());
    }
    for path in selected {
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update([0u8]);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..FINGERPRINT_LEN].to_string()
}

/// Read a bundle back, e.g. for the clipboard
pub fn bundle_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CatselError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_shape() {
        let selected: PathSet = [PathBuf::from("/w/a"), PathBuf::from("/w/b")]
            .into_iter()
            .collect();
        let fp = fingerprint(1_700_000_000, &selected, 0);
        assert_eq!(fp.len(), FINGERPRINT_LEN);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(fp, fingerprint(1_700_000_000, &selected, 0));
        assert_ne!(fp, fingerprint(1_700_000_001, &selected, 0));
        assert_ne!(fp, fingerprint(1_700_000_000, &PathSet::new(), 0));
        assert_ne!(fp, fingerprint(1_700_000_000, &selected, 1));
    }

    #[test]
    fn test_taken_name_is_salted_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let selected: PathSet = [dir.path().join("a.txt")].into_iter().collect();

        let (first, mut file) = create_bundle_file(dir.path(), 42, &selected).unwrap();
        file.write_all(b"kept").unwrap();
        drop(file);

        let (second, _) = create_bundle_file(dir.path(), 42, &selected).unwrap();
        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_string_lossy(),
            format!("cs_{}.txt", fingerprint(42, &selected, 1))
        );
        assert_eq!(fs::read_to_string(&first).unwrap(), "kept");
    }

    #[test]
    fn test_back_to_back_exports_keep_both_bundles() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::write(root.join("a.txt"), "hello\n").unwrap();
        let selected: PathSet = [root.join("a.txt")].into_iter().collect();
        let excluded = PathSet::new();
        let request = ExportRequest {
            selected: &selected,
            excluded: &excluded,
            include_mode: false,
            workspace_root: &root,
            current_directory: &root,
        };

        let generator = ExportGenerator::default();
        let first = generator.generate(&request).unwrap();
        let second = generator.generate(&request).unwrap();
        assert_ne!(first.path, second.path);
        assert!(first.path.exists());
        assert!(second.path.exists());
    }

    #[test]
    fn test_block_format() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "line").unwrap();

        let mut out = Vec::new();
        ExportGenerator::default()
            .write_bundle(&[a], dir.path(), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{}\n// File a.txt\nline\n// End of file a.txt\n\n",
                SEPARATOR
            )
        );
    }

    #[test]
    fn test_empty_file_has_no_body_line() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("empty.txt");
        fs::write(&a, "").unwrap();

        let mut out = Vec::new();
        ExportGenerator::default()
            .write_bundle(&[a], dir.path(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("// File empty.txt\n// End of file empty.txt\n"));
    }

    #[test]
    fn test_missing_file_gets_error_line() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone.txt");

        let mut out = Vec::new();
        let details = ExportGenerator::default()
            .write_bundle(&[gone], dir.path(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("// File gone.txt\n[Error reading file: "));
        assert!(text.ends_with("// End of file gone.txt\n\n"));
        assert_eq!(details[0].1.kind, BodyKind::Unreadable);
    }

    #[test]
    fn test_invalid_utf8_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let latin = dir.path().join("latin1.txt");
        fs::write(&latin, b"caf\xe9 au lait\n").unwrap();

        let mut out = Vec::new();
        ExportGenerator::default()
            .write_bundle(&[latin], dir.path(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("// File latin1.txt\n{}\n", ENCODING_PLACEHOLDER)));
    }
}
