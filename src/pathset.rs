/*!
 * Ordered set of absolute paths with ancestor and descendant queries
 */

use std::collections::BTreeSet;
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// A set of absolute paths
///
/// `Path` orders component-wise, so every descendant of a path sorts
/// directly after it. Descendant queries are a range scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: BTreeSet<PathBuf>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning true if it was not present
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    /// Remove a path, returning true if it was present
    pub fn remove(&mut self, path: &Path) -> bool {
        self.paths.remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Paths in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Proper descendants of `prefix`, in sorted order
    pub fn descendants<'a>(&'a self, prefix: &'a Path) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.paths
            .range::<Path, _>((Bound::Excluded(prefix), Bound::Unbounded))
            .take_while(move |p| p.starts_with(prefix))
    }

    /// Remove `prefix` and every path under it, returning how many went
    pub fn remove_prefixed(&mut self, prefix: &Path) -> usize {
        let doomed: Vec<PathBuf> = self.descendants(prefix).cloned().collect();
        let mut removed = usize::from(self.paths.remove(prefix));
        for path in doomed {
            self.paths.remove(&path);
            removed += 1;
        }
        removed
    }

    /// Closest proper ancestor of `path` present in the set
    pub fn nearest_ancestor(&self, path: &Path) -> Option<&Path> {
        path.ancestors()
            .skip(1)
            .find_map(|a| self.paths.get(a).map(PathBuf::as_path))
    }

    /// True if `path` or one of its ancestors is present
    pub fn covers(&self, path: &Path) -> bool {
        self.contains(path) || self.nearest_ancestor(path).is_some()
    }

    /// Snapshot as a sorted vector
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.paths.iter().cloned().collect()
    }
}

impl FromIterator<PathBuf> for PathSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathBuf;
    type IntoIter = std::collections::btree_set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> PathSet {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_descendants_are_component_wise() {
        let s = set(&["/w/a", "/w/a/b", "/w/a/b/c.txt", "/w/ab", "/w/a.txt", "/w/b"]);
        let found: Vec<_> = s.descendants(Path::new("/w/a")).collect();
        assert_eq!(
            found,
            vec![&PathBuf::from("/w/a/b"), &PathBuf::from("/w/a/b/c.txt")]
        );
    }

    #[test]
    fn test_remove_prefixed() {
        let mut s = set(&["/w/a", "/w/a/b", "/w/a/b/c.txt", "/w/ab"]);
        assert_eq!(s.remove_prefixed(Path::new("/w/a")), 3);
        assert_eq!(s.to_vec(), vec![PathBuf::from("/w/ab")]);

        // Prefix itself need not be present
        let mut s = set(&["/w/a/x", "/w/a/y"]);
        assert_eq!(s.remove_prefixed(Path::new("/w/a")), 2);
        assert!(s.is_empty());
    }

    #[test]
    fn test_nearest_ancestor() {
        let s = set(&["/w", "/w/a/b"]);
        assert_eq!(
            s.nearest_ancestor(Path::new("/w/a/b/c/d.txt")),
            Some(Path::new("/w/a/b"))
        );
        assert_eq!(s.nearest_ancestor(Path::new("/w/z")), Some(Path::new("/w")));
        // Proper ancestors only
        assert_eq!(s.nearest_ancestor(Path::new("/w")), None);
        assert!(s.covers(Path::new("/w")));
        assert!(!s.covers(Path::new("/other")));
    }
}
