//! Source unit discovery.
//!
//! Walks a root directory and groups matching files by the directory that
//! directly contains them. Traversal order is not part of the contract.

use crate::adapters::java::test_detector::JavaTestDetector;
use crate::domain::error::AnalysisError;
use crate::domain::source_tree::SourceTree;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

const MAX_REPORTED_SKIPS: usize = 10;

/// Unreadable directory entries: the first few are logged, the rest counted.
#[derive(Debug, Default)]
struct SkippedEntries {
    count: usize,
}

impl SkippedEntries {
    fn record(&mut self, err: impl Display) {
        if self.count < MAX_REPORTED_SKIPS {
            warn!("Skipping directory entry: {}", err);
        }
        self.count += 1;
    }

    fn finish(self) {
        if self.count > MAX_REPORTED_SKIPS {
            warn!(
                "Skipped {} additional directory entries",
                self.count - MAX_REPORTED_SKIPS
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Extension allowlist, without the leading dot. Compared case-insensitively.
    pub extensions: Vec<String>,
    /// When false, test sources are left out of the tree.
    pub include_tests: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            include_tests: true,
        }
    }
}

impl DiscoveryOptions {
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
    }
}

/// Fail with `InvalidRoot` unless `root` is an existing directory.
pub fn check_root(root: &Path) -> Result<(), AnalysisError> {
    if !root.exists() {
        return Err(AnalysisError::invalid_root(root, "does not exist"));
    }
    if !root.is_dir() {
        return Err(AnalysisError::invalid_root(root, "not a directory"));
    }
    Ok(())
}

/// Discover every unit below `root`.
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<SourceTree, AnalysisError> {
    check_root(root)?;
    let detector = JavaTestDetector;
    let mut tree = SourceTree::new(root);
    let mut skipped = SkippedEntries::default();

    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_map(|e| match e {
        Ok(entry) => Some(entry),
        Err(err) => {
            skipped.record(err);
            None
        }
    }) {
        if !entry.file_type().is_file() || !options.matches(entry.path()) {
            continue;
        }
        if !options.include_tests && detector.is_test_source(&relative_slash_path(root, entry.path())) {
            debug!(path = %entry.path().display(), "excluding test source");
            continue;
        }
        tree.add_unit(entry.into_path());
    }

    skipped.finish();
    debug!(
        root = %root.display(),
        units = tree.unit_count(),
        groupings = tree.grouping_dirs().count(),
        "discovery finished"
    );
    Ok(tree)
}

/// Units directly inside `dir`; subdirectories are not visited.
pub fn discover_grouping(dir: &Path, options: &DiscoveryOptions) -> Result<SourceTree, AnalysisError> {
    check_root(dir)?;
    let detector = JavaTestDetector;
    let mut tree = SourceTree::new(dir);
    let entries = std::fs::read_dir(dir).map_err(|err| AnalysisError::invalid_root(dir, err.to_string()))?;
    let mut skipped = SkippedEntries::default();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                skipped.record(err);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !options.matches(&path) {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !options.include_tests && detector.is_test_source(&name) {
            continue;
        }
        tree.add_unit(path);
    }
    skipped.finish();
    Ok(tree)
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
