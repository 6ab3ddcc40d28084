use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency kind - how a unit's declared type refers to another type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    // ============ Type Hierarchy ============
    Extends,
    Implements,

    // ============ Members ============
    Field,
    MethodParameter,
    MethodReturn,

    // ============ Expressions ============
    Instantiation,

    // ============ Explicit References ============
    /// Single-type import; only emitted when imports are enabled in the exclusion policy.
    Import,
}

impl DependencyKind {
    pub fn label(&self) -> &'static str {
        match self {
            DependencyKind::Extends => "Extends",
            DependencyKind::Implements => "Implements",
            DependencyKind::Field => "Field",
            DependencyKind::MethodParameter => "MethodParameter",
            DependencyKind::MethodReturn => "MethodReturn",
            DependencyKind::Instantiation => "Instantiation",
            DependencyKind::Import => "Import",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed, located reference from a unit's declared type to another type.
///
/// Equality is structural over all five fields, so a set of edges collapses
/// syntactic repeats of the same construct on the same line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source_type: String,
    pub target_type: String,
    pub kind: DependencyKind,
    pub snippet: String,
    /// 1-based source line, `None` when the parser could not locate the construct.
    pub line: Option<usize>,
}

impl DependencyEdge {
    pub fn new(
        source_type: impl Into<String>,
        target_type: impl Into<String>,
        kind: DependencyKind,
        snippet: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            target_type: target_type.into(),
            kind,
            snippet: snippet.into(),
            line,
        }
    }

    /// Line in the report convention: 1-based, `-1` when unknown.
    pub fn line_number(&self) -> i64 {
        self.line.map_or(-1, |line| line as i64)
    }

    /// Grouping referenced by this edge: the target up to its last `.`.
    pub fn target_grouping(&self) -> Option<&str> {
        // Generic arguments of an unresolved name are not part of its namespace.
        let base = self.target_type.split('<').next().unwrap_or(&self.target_type);
        base.rfind('.')
            .map(|idx| &base[..idx])
            .filter(|prefix| !prefix.is_empty())
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}: {} at line: {})",
            self.target_type,
            self.kind,
            self.snippet,
            self.line_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_structural_equality_collapses_in_set() {
        let mut set = BTreeSet::new();
        set.insert(DependencyEdge::new("a.A", "a.B", DependencyKind::Field, "B b", Some(3)));
        set.insert(DependencyEdge::new("a.A", "a.B", DependencyKind::Field, "B b", Some(3)));
        set.insert(DependencyEdge::new("a.A", "a.B", DependencyKind::Field, "B b", Some(4)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_uses_minus_one_for_unknown_line() {
        let edge = DependencyEdge::new("a.A", "a.B", DependencyKind::Instantiation, "new B()", None);
        assert_eq!(edge.to_string(), "a.B (Instantiation: new B() at line: -1)");
        assert_eq!(edge.line_number(), -1);
    }

    #[test]
    fn test_target_grouping() {
        let edge = DependencyEdge::new("a.A", "com.x.B", DependencyKind::Field, "B b", Some(1));
        assert_eq!(edge.target_grouping(), Some("com.x"));
        let bare = DependencyEdge::new("a.A", "B", DependencyKind::Field, "B b", Some(1));
        assert_eq!(bare.target_grouping(), None);
    }
}
