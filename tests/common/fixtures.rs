//! Test fixture generators for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use type_deps::app::{AnalysisConfig, FailurePolicy, Orchestrator, RunEvent, RunState};

use super::mock::{MockConfigurator, MockSourceReader};

/// Files on disk for discovery, contents served by a [`MockSourceReader`].
pub struct MockTree {
    pub dir: TempDir,
    pub reader: MockSourceReader,
}

impl MockTree {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn delay(&mut self, relative: &str, delay: Duration) {
        let path = self.path(relative);
        self.reader.add_delay(path, delay);
    }

    /// Discoverable on disk but unknown to the reader.
    pub fn add_unreadable(&self, relative: &str) {
        touch(&self.path(relative), "");
    }
}

/// `units` are `(relative path, outline)` pairs in the mock resolver format.
pub fn mock_tree(units: &[(&str, &str)]) -> MockTree {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut reader = MockSourceReader::new();
    for (relative, outline) in units {
        let path = dir.path().join(relative);
        touch(&path, "");
        reader.add_file(&path, *outline);
    }
    MockTree { dir, reader }
}

/// `count` independent units `u/U0.java`, `u/U1.java`, ... in package `u`.
pub fn uniform_tree(count: usize) -> MockTree {
    let units: Vec<(String, String)> = (0..count)
        .map(|i| (format!("u/U{i}.java"), format!("package u\nclass U{i}\nfield Shared s")))
        .collect();
    let borrowed: Vec<(&str, &str)> = units.iter().map(|(p, o)| (p.as_str(), o.as_str())).collect();
    mock_tree(&borrowed)
}

/// Real Java sources on disk.
pub fn java_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (relative, source) in files {
        touch(&dir.path().join(relative), source);
    }
    dir
}

fn touch(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write fixture file");
}

pub fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        excluded_prefixes: vec!["std.".to_string()],
        max_concurrency: 4,
        backpressure_limit: 16,
        unit_timeout_ms: 5_000,
        admission_timeout_ms: 5_000,
        ..Default::default()
    }
}

pub fn best_effort(config: AnalysisConfig) -> AnalysisConfig {
    AnalysisConfig {
        failure_policy: FailurePolicy::BestEffort,
        ..config
    }
}

/// Orchestrator over a [`MockTree`] with an event channel attached.
pub struct Harness {
    pub orchestrator: Orchestrator,
    pub reader: Arc<MockSourceReader>,
    pub configurator: Arc<MockConfigurator>,
    pub events: mpsc::UnboundedReceiver<RunEvent>,
    pub dir: TempDir,
}

impl Harness {
    pub fn new(tree: MockTree, config: AnalysisConfig) -> Self {
        let reader = Arc::new(tree.reader);
        let configurator = Arc::new(MockConfigurator::new());
        let (tx, events) = mpsc::unbounded_channel();
        let orchestrator = Orchestrator::new(config, reader.clone(), configurator.clone())
            .expect("valid config")
            .with_events(tx);
        Self {
            orchestrator,
            reader,
            configurator,
            events,
            dir: tree.dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn events(&mut self) -> Vec<RunEvent> {
        drain(&mut self.events)
    }
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn states(events: &[RunEvent]) -> Vec<RunState> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::StateChanged(state) => Some(*state),
            _ => None,
        })
        .collect()
}
