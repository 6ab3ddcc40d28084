use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of discovery: the units of a tree and the directories that directly
/// contain them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    root: PathBuf,
    /// Grouping directory -> units directly inside it, sorted by path.
    groupings: BTreeMap<PathBuf, Vec<PathBuf>>,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            groupings: BTreeMap::new(),
        }
    }

    /// Register a unit under its parent directory.
    pub fn add_unit(&mut self, unit: impl Into<PathBuf>) {
        let unit = unit.into();
        let dir = unit
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let units = self.groupings.entry(dir).or_default();
        if let Err(pos) = units.binary_search(&unit) {
            units.insert(pos, unit);
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every unit in the tree. Restartable: each call yields a fresh iterator.
    pub fn units(&self) -> impl Iterator<Item = &Path> {
        self.groupings.values().flatten().map(PathBuf::as_path)
    }

    pub fn unit_count(&self) -> usize {
        self.groupings.values().map(Vec::len).sum()
    }

    /// Directories directly containing at least one unit.
    pub fn grouping_dirs(&self) -> impl Iterator<Item = &Path> {
        self.groupings.keys().map(PathBuf::as_path)
    }

    pub fn groupings(&self) -> impl Iterator<Item = (&Path, &[PathBuf])> {
        self.groupings
            .iter()
            .map(|(dir, units)| (dir.as_path(), units.as_slice()))
    }

    pub fn units_in(&self, dir: &Path) -> &[PathBuf] {
        self.groupings.get(dir).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groupings.is_empty()
    }
}
