use crate::adapters::fs::reader::FileSourceReader;
use crate::adapters::java::JavaResolverConfigurator;
use crate::app::config::{AnalysisConfig, FailurePolicy};
use crate::app::orchestrator::{Analysis, Orchestrator};
use crate::domain::error::AnalysisError;
use crate::domain::graph::DependencyGraph;
use crate::domain::report::{GroupingReport, UnitReport, WholeTreeReport};
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Sectioned text report
    #[default]
    Text,
    /// serde JSON of the report
    Json,
    /// Graphviz DOT of the dependency graph
    Dot,
}

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub best_effort: bool,
    pub include_imports: bool,
    pub exclude_tests: bool,
    pub exclude: Vec<String>,
    pub backpressure: Option<usize>,
}

impl Overrides {
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if self.best_effort {
            config.failure_policy = FailurePolicy::BestEffort;
        }
        if self.include_imports {
            config.include_imports = true;
        }
        if self.exclude_tests {
            config.include_tests = false;
        }
        config.excluded_prefixes.extend(self.exclude.iter().cloned());
        if let Some(limit) = self.backpressure {
            config.backpressure_limit = limit;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn java_orchestrator(config: AnalysisConfig) -> Result<Orchestrator> {
    let orchestrator = Orchestrator::new(
        config,
        Arc::new(FileSourceReader::new()),
        Arc::new(JavaResolverConfigurator),
    )?;
    Ok(orchestrator)
}

pub async fn analyze_tree(root: &Path, config: AnalysisConfig, format: OutputFormat) -> Result<()> {
    let orchestrator = java_orchestrator(config)?;
    let analysis = orchestrator
        .analyze(root)
        .await
        .with_context(|| format!("Failed to analyze {}", root.display()))?;
    report_failures(&analysis.failures);
    print_report(&analysis.report, format, || DependencyGraph::groupings(&analysis.report))
}

pub async fn analyze_package(dir: &Path, config: AnalysisConfig, format: OutputFormat) -> Result<()> {
    let orchestrator = java_orchestrator(config)?;
    let Analysis { report, failures } = orchestrator
        .analyze_grouping(dir)
        .await
        .with_context(|| format!("Failed to analyze package {}", dir.display()))?;
    report_failures(&failures);
    print_report(&report, format, || DependencyGraph::units(&single_grouping_tree(&report)))
}

pub async fn analyze_unit(path: &Path, config: AnalysisConfig, format: OutputFormat) -> Result<()> {
    let orchestrator = java_orchestrator(config)?;
    let analysis = orchestrator
        .analyze_unit(path)
        .await
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    let unit = analysis.report;
    print_report(&unit, format, || {
        let mut grouping = GroupingReport::new("");
        grouping.add_unit(unit.clone());
        DependencyGraph::units(&single_grouping_tree(&grouping))
    })
}

fn single_grouping_tree(grouping: &GroupingReport) -> WholeTreeReport {
    let mut tree = WholeTreeReport::new(grouping.grouping_name());
    tree.add_grouping(grouping.clone());
    tree
}

fn print_report<R, G>(report: &R, format: OutputFormat, graph: G) -> Result<()>
where
    R: std::fmt::Display + Serialize,
    G: FnOnce() -> DependencyGraph,
{
    match format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Dot => print!("{}", graph().to_dot()),
    }
    Ok(())
}

fn report_failures(failures: &[AnalysisError]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{} unit(s) could not be analyzed:", failures.len());
    for failure in failures {
        eprintln!("  {failure}");
    }
}
