//! Orchestrator - concurrent fan-out of unit classification and single-writer
//! fan-in into the report hierarchy.
//!
//! One task per unit reads, parses and classifies on the blocking pool. A
//! single aggregation loop owns every grouping report and is the only place
//! reports are mutated. At most `backpressure_limit` units are scheduled but
//! not yet merged; when the pipeline stays full for longer than the admission
//! timeout the run fails with `CapacityExceeded`.

use crate::adapters::fs::discovery::{self, check_root};
use crate::app::config::{AnalysisConfig, FailurePolicy};
use crate::domain::classifier::DependencyClassifier;
use crate::domain::error::AnalysisError;
use crate::domain::policy::ExclusionPolicy;
use crate::domain::ports::{ResolverConfigurator, SourceReader, TypeResolver};
use crate::domain::report::{GroupingReport, UnitReport, WholeTreeReport};
use crate::domain::source_tree::SourceTree;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::timeout;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Discovering,
    /// Units remain to be scheduled.
    Classifying,
    /// Every unit is scheduled; draining results.
    Aggregating,
    Completed,
    Failed,
}

/// Progress notifications for an optional observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    StateChanged(RunState),
    UnitMerged { unit: String, dependencies: usize },
    UnitFailed { path: PathBuf, message: String },
}

/// Result of a run that was not aborted.
///
/// `failures` is always empty under [`FailurePolicy::FailFast`].
#[derive(Debug)]
pub struct Analysis<R> {
    pub report: R,
    pub failures: Vec<AnalysisError>,
}

impl<R> Analysis<R> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Orchestrator {
    config: AnalysisConfig,
    reader: Arc<dyn SourceReader>,
    configurator: Arc<dyn ResolverConfigurator>,
    events: Option<mpsc::UnboundedSender<RunEvent>>,
}

struct ClassifiedUnit {
    report: UnitReport,
    package: Option<String>,
}

struct UnitOutcome {
    grouping: usize,
    path: PathBuf,
    result: Result<ClassifiedUnit, AnalysisError>,
}

/// Grouping report under construction, plus what is needed to name it.
struct GroupingAccumulator {
    dir: PathBuf,
    report: GroupingReport,
    /// Package of the first unit, in path order, that declares one.
    package: Option<(PathBuf, String)>,
}

impl GroupingAccumulator {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            report: GroupingReport::new(dir_name(dir)),
            package: None,
        }
    }

    fn merge(&mut self, path: PathBuf, unit: ClassifiedUnit) {
        if let Some(package) = unit.package.filter(|p| !p.is_empty()) {
            let has_earlier = self
                .package
                .as_ref()
                .is_some_and(|(first, _)| first.as_path() < path.as_path());
            if !has_earlier {
                self.package = Some((path, package));
            }
        }
        if let Some(replaced) = self.report.add_unit(unit.report) {
            debug!(unit = replaced.unit_name(), "unit report replaced");
        }
    }

    /// Named grouping report, or `None` when no unit succeeded.
    fn finish(self) -> Option<GroupingReport> {
        if self.report.is_empty() {
            debug!(dir = %self.dir.display(), "grouping has no analysed units");
            return None;
        }
        let name = match self.package {
            Some((_, package)) => package,
            None => dir_name(&self.dir),
        };
        Some(self.report.renamed(name))
    }
}

struct Collected {
    groupings: Vec<GroupingAccumulator>,
    failures: Vec<AnalysisError>,
}

struct RunTracker<'a> {
    state: RunState,
    events: Option<&'a mpsc::UnboundedSender<RunEvent>>,
}

impl<'a> RunTracker<'a> {
    fn new(events: Option<&'a mpsc::UnboundedSender<RunEvent>>) -> Self {
        Self {
            state: RunState::Idle,
            events,
        }
    }

    fn transition(&mut self, next: RunState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "run state");
        self.state = next;
        self.emit(RunEvent::StateChanged(next));
    }

    fn emit(&self, event: RunEvent) {
        if let Some(events) = self.events {
            // A dropped observer does not affect the run.
            let _ = events.send(event);
        }
    }

    fn finish<T>(&mut self, result: Result<T, AnalysisError>) -> Result<T, AnalysisError> {
        match &result {
            Ok(_) => self.transition(RunState::Completed),
            Err(err) => {
                warn!("Analysis failed: {}", err);
                self.transition(RunState::Failed);
            }
        }
        result
    }
}

impl Orchestrator {
    pub fn new(
        config: AnalysisConfig,
        reader: Arc<dyn SourceReader>,
        configurator: Arc<dyn ResolverConfigurator>,
    ) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            config,
            reader,
            configurator,
            events: None,
        })
    }

    /// Send run progress to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Whole-tree analysis of every unit below `root`.
    pub async fn analyze(&self, root: &Path) -> Result<Analysis<WholeTreeReport>, AnalysisError> {
        let mut run = RunTracker::new(self.events.as_ref());
        let result = self.analyze_tree(root, &mut run).await;
        run.finish(result)
    }

    /// Package-level analysis of the units directly inside `dir`.
    pub async fn analyze_grouping(&self, dir: &Path) -> Result<Analysis<GroupingReport>, AnalysisError> {
        let mut run = RunTracker::new(self.events.as_ref());
        let result = self.analyze_dir(dir, &mut run).await;
        run.finish(result)
    }

    /// Class-level analysis of one unit. A failure of that unit is returned as
    /// the error under either policy.
    pub async fn analyze_unit(&self, path: &Path) -> Result<Analysis<UnitReport>, AnalysisError> {
        let mut run = RunTracker::new(self.events.as_ref());
        let result = self.analyze_file(path, &mut run).await;
        run.finish(result)
    }

    async fn analyze_tree(
        &self,
        root: &Path,
        run: &mut RunTracker<'_>,
    ) -> Result<Analysis<WholeTreeReport>, AnalysisError> {
        run.transition(RunState::Discovering);
        let tree = discovery::discover(root, &self.config.discovery_options())?;
        info!(
            root = %root.display(),
            units = tree.unit_count(),
            groupings = tree.grouping_dirs().count(),
            "Analyzing source tree"
        );

        // Configure once; every task shares this frozen handle.
        let resolver = self.configurator.configure(&tree);
        let collected = self.fan_out(resolver, &tree, run).await?;

        let mut report = WholeTreeReport::new(tree_name(root));
        for grouping in collected.groupings.into_iter().filter_map(GroupingAccumulator::finish) {
            // Directories declaring the same package fold into one grouping.
            let grouping = match report.remove_grouping(grouping.grouping_name()) {
                Some(mut existing) => {
                    existing.absorb(grouping);
                    existing
                }
                None => grouping,
            };
            report.add_grouping(grouping);
        }

        info!(
            groupings = report.grouping_count(),
            units = report.unit_count(),
            dependencies = report.total_dependency_count(),
            failures = collected.failures.len(),
            "Analysis finished"
        );
        Ok(Analysis {
            report,
            failures: collected.failures,
        })
    }

    async fn analyze_dir(
        &self,
        dir: &Path,
        run: &mut RunTracker<'_>,
    ) -> Result<Analysis<GroupingReport>, AnalysisError> {
        run.transition(RunState::Discovering);
        let tree = discovery::discover_grouping(dir, &self.config.discovery_options())?;
        info!(dir = %dir.display(), units = tree.unit_count(), "Analyzing grouping");

        let resolver = self.configurator.configure(&tree);
        let collected = self.fan_out(resolver, &tree, run).await?;
        let report = collected
            .groupings
            .into_iter()
            .filter_map(GroupingAccumulator::finish)
            .next()
            .unwrap_or_else(|| GroupingReport::new(dir_name(dir)));
        Ok(Analysis {
            report,
            failures: collected.failures,
        })
    }

    async fn analyze_file(
        &self,
        path: &Path,
        run: &mut RunTracker<'_>,
    ) -> Result<Analysis<UnitReport>, AnalysisError> {
        run.transition(RunState::Discovering);
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        check_root(dir)?;
        // Siblings are indexed so same-package references resolve.
        let mut scope = discovery::discover_grouping(dir, &self.config.discovery_options())?;
        scope.add_unit(path);
        let resolver = self.configurator.configure(&scope);

        let mut tree = SourceTree::new(dir);
        tree.add_unit(path);
        let mut collected = self.fan_out(resolver, &tree, run).await?;
        if let Some(err) = collected.failures.pop() {
            return Err(err);
        }
        let unit = collected
            .groupings
            .iter()
            .find_map(|g| g.report.units().values().next().cloned())
            .ok_or_else(|| AnalysisError::TaskFailed {
                path: path.to_path_buf(),
                message: "no report produced".to_string(),
            })?;
        Ok(Analysis {
            report: unit,
            failures: Vec::new(),
        })
    }

    /// Classify every unit of `tree` and merge the results per grouping.
    async fn fan_out(
        &self,
        resolver: Arc<dyn TypeResolver>,
        tree: &SourceTree,
        run: &mut RunTracker<'_>,
    ) -> Result<Collected, AnalysisError> {
        let policy = Arc::new(self.config.exclusion_policy());
        let workers = Arc::new(Semaphore::new(self.config.max_concurrency));
        let limit = self.config.backpressure_limit;
        let admission_timeout = self.config.admission_timeout();
        let fail_fast = self.config.failure_policy == FailurePolicy::FailFast;

        let mut groupings: Vec<GroupingAccumulator> =
            tree.grouping_dirs().map(GroupingAccumulator::new).collect();
        let mut pending = tree
            .groupings()
            .enumerate()
            .flat_map(|(idx, (_, units))| units.iter().map(move |unit| (idx, unit.clone())))
            .peekable();

        let (tx, mut rx) = mpsc::channel::<UnitOutcome>(limit);
        let mut in_flight = 0usize;
        let mut failures = Vec::new();

        if pending.peek().is_some() {
            run.transition(RunState::Classifying);
        }

        loop {
            while in_flight < limit
                && let Some((grouping, path)) = pending.next()
            {
                self.spawn_unit(grouping, path, &tx, &workers, &resolver, &policy);
                in_flight += 1;
            }

            let blocked = pending.peek().map(|(_, path)| path.clone());
            if blocked.is_none() {
                run.transition(RunState::Aggregating);
            }
            if in_flight == 0 {
                break;
            }

            let received = match blocked {
                Some(unit) => match timeout(admission_timeout, rx.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        rx.close();
                        return Err(AnalysisError::CapacityExceeded { limit, unit });
                    }
                },
                None => rx.recv().await,
            };
            let Some(outcome) = received else {
                break;
            };
            in_flight -= 1;

            match outcome.result {
                Ok(unit) => {
                    let name = unit.report.unit_name().to_string();
                    let dependencies = unit.report.dependency_count();
                    debug!(unit = %name, dependencies, "unit merged");
                    groupings[outcome.grouping].merge(outcome.path, unit);
                    run.emit(RunEvent::UnitMerged { unit: name, dependencies });
                }
                Err(err) if fail_fast => {
                    // Queued tasks see the closed channel and never start;
                    // running ones finish and their results are dropped.
                    rx.close();
                    return Err(err);
                }
                Err(err) => {
                    warn!("Skipping unit {}: {}", outcome.path.display(), err);
                    run.emit(RunEvent::UnitFailed {
                        path: outcome.path,
                        message: err.to_string(),
                    });
                    failures.push(err);
                }
            }
        }

        Ok(Collected { groupings, failures })
    }

    fn spawn_unit(
        &self,
        grouping: usize,
        path: PathBuf,
        tx: &mpsc::Sender<UnitOutcome>,
        workers: &Arc<Semaphore>,
        resolver: &Arc<dyn TypeResolver>,
        policy: &Arc<ExclusionPolicy>,
    ) {
        let tx = tx.clone();
        let workers = Arc::clone(workers);
        let resolver = Arc::clone(resolver);
        let policy = Arc::clone(policy);
        let reader = Arc::clone(&self.reader);
        let unit_timeout = self.config.unit_timeout();

        tokio::spawn(async move {
            let Ok(permit) = workers.acquire_owned().await else {
                return;
            };
            if tx.is_closed() {
                return;
            }

            // The permit is held by the blocking work itself, so a unit that
            // timed out still occupies its worker slot until it finishes.
            let unit = path.clone();
            let work = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                classify_unit(reader.as_ref(), resolver.as_ref(), &policy, &unit)
            });
            let result = match timeout(unit_timeout, work).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(AnalysisError::TaskFailed {
                    path: path.clone(),
                    message: join_err.to_string(),
                }),
                Err(_) => Err(AnalysisError::Timeout {
                    path: path.clone(),
                    after: unit_timeout,
                }),
            };
            // Fails only when the run was aborted; the result is discarded.
            let _ = tx
                .send(UnitOutcome {
                    grouping,
                    path,
                    result,
                })
                .await;
        });
    }
}

/// Read, parse and classify one unit.
fn classify_unit(
    reader: &dyn SourceReader,
    resolver: &dyn TypeResolver,
    policy: &ExclusionPolicy,
    path: &Path,
) -> Result<ClassifiedUnit, AnalysisError> {
    let source = reader
        .read(path)
        .map_err(|source| AnalysisError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
    let tree = resolver
        .parse(&source)
        .map_err(|failure| AnalysisError::UnparsableSource {
            path: path.to_path_buf(),
            diagnostic: failure.diagnostic,
        })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let unit_name = tree.unit_name(&stem);
    let report = DependencyClassifier::new(resolver, policy).classify(&tree, &unit_name);
    Ok(ClassifiedUnit {
        report,
        package: tree.package,
    })
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Final component of the root, resolving `.` and `..` when possible.
fn tree_name(root: &Path) -> String {
    match root.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => std::fs::canonicalize(root)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| root.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, package: Option<&str>) -> ClassifiedUnit {
        ClassifiedUnit {
            report: UnitReport::new(name),
            package: package.map(str::to_string),
        }
    }

    #[test]
    fn test_grouping_named_after_first_declared_package() {
        let mut acc = GroupingAccumulator::new(Path::new("/src/a"));
        acc.merge(PathBuf::from("/src/a/C.java"), unit("x.C", Some("x")));
        acc.merge(PathBuf::from("/src/a/B.java"), unit("B", None));
        acc.merge(PathBuf::from("/src/a/A.java"), unit("w.A", Some("w")));
        let report = acc.finish().unwrap();
        assert_eq!(report.grouping_name(), "w");
        assert_eq!(report.unit_count(), 3);
    }

    #[test]
    fn test_grouping_falls_back_to_directory_name() {
        let mut acc = GroupingAccumulator::new(Path::new("/src/util"));
        acc.merge(PathBuf::from("/src/util/A.java"), unit("A", None));
        assert_eq!(acc.finish().unwrap().grouping_name(), "util");
    }

    #[test]
    fn test_empty_grouping_is_skipped() {
        assert!(GroupingAccumulator::new(Path::new("/src/a")).finish().is_none());
    }

    #[test]
    fn test_tree_name() {
        assert_eq!(tree_name(Path::new("/work/project")), "project");
        assert_eq!(dir_name(Path::new("/work/project/util")), "util");
    }
}
