use crate::adapters::fs::discovery::DiscoveryOptions;
use crate::domain::error::AnalysisError;
use crate::domain::policy::{DEFAULT_EXCLUDED_PREFIXES, ExclusionPolicy};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What a run does with a unit that cannot be read, parsed or finished in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort on the first unit failure and return it; no partial report.
    #[default]
    FailFast,
    /// Keep every unit that succeeded and report the failures next to it.
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// File extensions treated as units, without the dot.
    pub extensions: Vec<String>,
    /// Target names starting with any of these never become edges.
    pub excluded_prefixes: Vec<String>,
    /// Emit `Import` edges for single-type imports.
    pub include_imports: bool,
    /// Analyse test sources as well.
    pub include_tests: bool,
    /// Units scheduled but not yet merged, at most.
    pub backpressure_limit: usize,
    /// Units read, parsed and classified at the same time, at most.
    pub max_concurrency: usize,
    pub unit_timeout_ms: u64,
    /// How long a full pipeline may stall before the run fails with
    /// `CapacityExceeded`. When this is not below `unit_timeout_ms`, units
    /// stuck in a full pipeline fail with `Timeout` first.
    pub admission_timeout_ms: u64,
    pub failure_policy: FailurePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES.iter().map(|p| p.to_string()).collect(),
            include_imports: false,
            include_tests: true,
            backpressure_limit: 256,
            max_concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            unit_timeout_ms: 30_000,
            admission_timeout_ms: 10_000,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.backpressure_limit == 0 {
            return Err(AnalysisError::InvalidConfig(
                "backpressure_limit must be positive".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_concurrency must be positive".to_string(),
            ));
        }
        if self.unit_timeout_ms == 0 {
            return Err(AnalysisError::InvalidConfig(
                "unit_timeout_ms must be positive".to_string(),
            ));
        }
        if self.admission_timeout_ms == 0 {
            return Err(AnalysisError::InvalidConfig(
                "admission_timeout_ms must be positive".to_string(),
            ));
        }
        if self.extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(AnalysisError::InvalidConfig(
                "at least one file extension is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new(self.excluded_prefixes.iter().cloned()).with_imports(self.include_imports)
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            extensions: self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            include_tests: self.include_tests,
        }
    }

    pub fn unit_timeout(&self) -> Duration {
        Duration::from_millis(self.unit_timeout_ms)
    }

    pub fn admission_timeout(&self) -> Duration {
        Duration::from_millis(self.admission_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert!(!config.exclusion_policy().should_include("java.util.List", "a.A"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"backpressure_limit": 8, "failure_policy": "best_effort"}"#).unwrap();
        assert_eq!(config.backpressure_limit, 8);
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.extensions, vec!["java".to_string()]);
    }

    #[test]
    fn test_rejects_zero_limits() {
        let config = AnalysisConfig {
            backpressure_limit: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))));

        let config = AnalysisConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let config = AnalysisConfig {
            unit_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(msg)) if msg.contains("unit_timeout_ms")));

        let config = AnalysisConfig {
            admission_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(msg)) if msg.contains("admission_timeout_ms")));
    }

    #[test]
    fn test_default_admission_timeout_fires_before_unit_timeout() {
        let config = AnalysisConfig::default();
        assert!(config.admission_timeout() < config.unit_timeout());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"include_imports": true, "excluded_prefixes": ["std."]}"#).unwrap();
        let config = AnalysisConfig::from_json_file(&path).unwrap();
        let policy = config.exclusion_policy();
        assert!(policy.include_imports());
        assert!(policy.should_include("java.util.List", "a.A"));
        assert!(!policy.should_include("std.Vec", "a.A"));

        std::fs::write(&path, r#"{"backpressure_limit": 0}"#).unwrap();
        assert!(AnalysisConfig::from_json_file(&path).is_err());
    }
}
