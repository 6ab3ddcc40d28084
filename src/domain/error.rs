//! Error taxonomy for analysis runs.
//!
//! Unresolved type names are not represented here: the classifier falls back to
//! the literal written name and never reports them.

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Root path missing or not a directory. Nothing was scheduled.
    #[error("invalid root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// I/O failure while reading a unit's bytes.
    #[error("unreadable source {}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser rejected the unit's text.
    #[error("unparsable source {}: {diagnostic}", path.display())]
    UnparsableSource { path: PathBuf, diagnostic: String },

    /// More units were pending than the backpressure limit allows and none
    /// completed within the admission window.
    #[error("capacity exceeded: {limit} units in flight, could not admit {}", unit.display())]
    CapacityExceeded { limit: usize, unit: PathBuf },

    /// A unit did not finish within the per-unit timeout.
    #[error("analysis of {} timed out after {after:?}", path.display())]
    Timeout { path: PathBuf, after: Duration },

    /// A classification task panicked or was cancelled by the runtime.
    #[error("classification task for {} failed: {message}", path.display())]
    TaskFailed { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The offending unit, when the error is attributable to one.
    pub fn unit(&self) -> Option<&Path> {
        match self {
            Self::UnreadableSource { path, .. }
            | Self::UnparsableSource { path, .. }
            | Self::Timeout { path, .. }
            | Self::TaskFailed { path, .. } => Some(path),
            Self::CapacityExceeded { unit, .. } => Some(unit),
            Self::InvalidRoot { .. } | Self::InvalidConfig(_) => None,
        }
    }

    /// Failures scoped to one unit. Only these may be collected under the
    /// best-effort policy; everything else ends the run.
    pub fn is_unit_failure(&self) -> bool {
        matches!(
            self,
            Self::UnreadableSource { .. }
                | Self::UnparsableSource { .. }
                | Self::Timeout { .. }
                | Self::TaskFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_identification() {
        let err = AnalysisError::UnparsableSource {
            path: PathBuf::from("a/B.java"),
            diagnostic: "syntax error at 3:1".into(),
        };
        assert_eq!(err.unit(), Some(Path::new("a/B.java")));
        assert!(err.is_unit_failure());

        let err = AnalysisError::invalid_root("missing", "does not exist");
        assert_eq!(err.unit(), None);
        assert!(!err.is_unit_failure());
    }

    #[test]
    fn test_capacity_exceeded_is_not_a_unit_failure() {
        let err = AnalysisError::CapacityExceeded {
            limit: 4,
            unit: PathBuf::from("a/C.java"),
        };
        assert!(!err.is_unit_failure());
        assert!(err.to_string().contains("4 units in flight"));
    }
}
