use crate::domain::source_tree::SourceTree;
use crate::domain::syntax::{SyntaxTree, TypeRef};
use std::path::Path;
use std::sync::Arc;

/// Source code reader port
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> std::io::Result<String>;
}

/// Outcome of resolving one written type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical, fully qualified name.
    Resolved(String),
    /// The resolver could not map the reference; callers use the written name.
    Unresolved,
}

impl Resolution {
    pub fn or_written(self, reference: &TypeRef) -> String {
        match self {
            Resolution::Resolved(name) => name,
            Resolution::Unresolved => reference.written.clone(),
        }
    }
}

/// Parser rejection with a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub diagnostic: String,
}

impl ParseFailure {
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }
}

/// Parser/symbol-resolver port (implemented by Infrastructure).
///
/// Implementations are shared read-only by every concurrent classification
/// task of a run and must not change behaviour after construction.
pub trait TypeResolver: Send + Sync {
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseFailure>;

    /// Resolve `reference`, as written inside `tree`, to its canonical name.
    fn resolve(&self, tree: &SyntaxTree, reference: &TypeRef) -> Resolution;
}

/// Builds the frozen resolver for one run.
///
/// Called once per run, after discovery and before any task starts, so that
/// tree-wide settings (source roots) are never reconfigured mid-run.
pub trait ResolverConfigurator: Send + Sync {
    fn configure(&self, tree: &SourceTree) -> Arc<dyn TypeResolver>;
}
