/*!
 * Utility functions for catsel
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use crate::types::Entry;

/// Number of leading bytes inspected when sniffing for binary content
pub const SNIFF_LEN: usize = 1024;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Heuristic binary check over a sample of leading bytes
///
/// More than 10 NUL bytes, or more than 30% control bytes other than
/// tab/newline/carriage return, marks the sample as binary.
pub fn looks_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }

    let nulls = sample.iter().filter(|&&b| b == 0).count();
    let control = sample
        .iter()
        .filter(|&&b| b < 32 && b != b'\t' && b != b'\n' && b != b'\r')
        .count();

    nulls > 10 || control as f64 / sample.len() as f64 > 0.3
}

/// Sniff the first [`SNIFF_LEN`] bytes of a file
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let mut buffer = [0u8; SNIFF_LEN];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(looks_binary(&buffer[..filled]))
}

/// Names of the subdirectories of `dir`, sorted case-sensitively
pub fn list_subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        if entry.file_type().map_or(false, |ft| ft.is_dir()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// File entries directly inside `dir`, sorted by name
///
/// A directory that cannot be read yields an empty list.
pub fn list_files(dir: &Path) -> Vec<Entry> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<Entry> = read_dir
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map_or(false, |ft| !ft.is_dir()))
        .map(|e| Entry::file(e.file_name().to_string_lossy().into_owned(), e.path()))
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}

/// Path of `path` relative to `base`, using ".." where needed
///
/// Falls back to `path` itself when the two share no common root.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let mut path_components = path.components().peekable();
    let mut base_components = base.components().peekable();

    if path_components.peek().map(|c| c.as_os_str()) != base_components.peek().map(|c| c.as_os_str())
        && matches!(path_components.peek(), Some(Component::Prefix(_) | Component::RootDir))
    {
        return path.to_path_buf();
    }

    while let (Some(a), Some(b)) = (path_components.peek(), base_components.peek()) {
        if a != b {
            break;
        }
        path_components.next();
        base_components.next();
    }

    let mut result = PathBuf::new();
    for _ in base_components {
        result.push("..");
    }
    for component in path_components {
        result.push(component.as_os_str());
    }
    result
}

/// Relative path rendered with forward slashes
pub fn display_relative(path: &Path, base: &Path) -> String {
    let rel = relative_path(path, base);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
