//! Report hierarchy: unit -> grouping -> whole tree.
//!
//! Pure data. Merges are performed by a single owner at a time; none of these
//! types synchronise internally.

use crate::domain::edge::{DependencyEdge, DependencyKind};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Dependencies of one unit (the type a single source file declares).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    unit_name: String,
    edges: BTreeSet<DependencyEdge>,
}

impl UnitReport {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            edges: BTreeSet::new(),
        }
    }

    /// Add an edge. Edges not originating from this unit, or pointing back at
    /// it, are rejected. Returns `true` when the set grew.
    pub fn add_dependency(&mut self, edge: DependencyEdge) -> bool {
        if edge.source_type != self.unit_name || edge.target_type == self.unit_name {
            return false;
        }
        self.edges.insert(edge)
    }

    pub fn unit_name(&self) -> &str {
        &self.unit_name
    }

    pub fn edges(&self) -> &BTreeSet<DependencyEdge> {
        &self.edges
    }

    pub fn dependency_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_dependency(&self, target: &str) -> bool {
        self.edges.iter().any(|e| e.target_type == target)
    }

    pub fn targets(&self) -> BTreeSet<&str> {
        self.edges.iter().map(|e| e.target_type.as_str()).collect()
    }

    pub fn edges_by_kind(&self) -> BTreeMap<DependencyKind, Vec<&DependencyEdge>> {
        let mut grouped: BTreeMap<DependencyKind, Vec<&DependencyEdge>> = BTreeMap::new();
        for edge in &self.edges {
            grouped.entry(edge.kind).or_default().push(edge);
        }
        grouped
    }
}

/// Units of one grouping (a directory, named after its package).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingReport {
    grouping_name: String,
    units: BTreeMap<String, UnitReport>,
}

impl GroupingReport {
    pub fn new(grouping_name: impl Into<String>) -> Self {
        Self {
            grouping_name: grouping_name.into(),
            units: BTreeMap::new(),
        }
    }

    pub fn grouping_name(&self) -> &str {
        &self.grouping_name
    }

    /// Same units under another name.
    pub fn renamed(mut self, grouping_name: impl Into<String>) -> Self {
        self.grouping_name = grouping_name.into();
        self
    }

    /// Insert `report`, replacing any unit with the same name. Returns the
    /// replaced report.
    pub fn add_unit(&mut self, report: UnitReport) -> Option<UnitReport> {
        self.units.insert(report.unit_name.clone(), report)
    }

    /// Move every unit of `other` into this grouping (replace-by-name).
    pub fn absorb(&mut self, other: GroupingReport) {
        for (_, unit) in other.units {
            self.add_unit(unit);
        }
    }

    pub fn units(&self) -> &BTreeMap<String, UnitReport> {
        &self.units
    }

    pub fn unit(&self, unit_name: &str) -> Option<&UnitReport> {
        self.units.get(unit_name)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn total_dependency_count(&self) -> usize {
        self.units.values().map(UnitReport::dependency_count).sum()
    }

    /// Union of every unit's target names.
    pub fn all_dependencies(&self) -> BTreeSet<&str> {
        self.units.values().flat_map(|u| u.targets()).collect()
    }

    /// Target prefixes (up to the last `.`) across all units.
    pub fn referenced_groupings(&self) -> BTreeSet<String> {
        self.units
            .values()
            .flat_map(|u| u.edges.iter())
            .filter_map(|e| e.target_grouping())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Every grouping of an analysed source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WholeTreeReport {
    tree_name: String,
    groupings: BTreeMap<String, GroupingReport>,
}

impl WholeTreeReport {
    pub fn new(tree_name: impl Into<String>) -> Self {
        Self {
            tree_name: tree_name.into(),
            groupings: BTreeMap::new(),
        }
    }

    pub fn tree_name(&self) -> &str {
        &self.tree_name
    }

    /// Insert `report`, replacing any grouping with the same name.
    pub fn add_grouping(&mut self, report: GroupingReport) -> Option<GroupingReport> {
        self.groupings.insert(report.grouping_name.clone(), report)
    }

    pub fn remove_grouping(&mut self, grouping_name: &str) -> Option<GroupingReport> {
        self.groupings.remove(grouping_name)
    }

    pub fn groupings(&self) -> &BTreeMap<String, GroupingReport> {
        &self.groupings
    }

    pub fn grouping(&self, grouping_name: &str) -> Option<&GroupingReport> {
        self.groupings.get(grouping_name)
    }

    pub fn grouping_count(&self) -> usize {
        self.groupings.len()
    }

    pub fn unit_count(&self) -> usize {
        self.groupings.values().map(GroupingReport::unit_count).sum()
    }

    pub fn total_dependency_count(&self) -> usize {
        self.groupings
            .values()
            .map(GroupingReport::total_dependency_count)
            .sum()
    }

    /// Look a unit up across all groupings.
    pub fn unit(&self, unit_name: &str) -> Option<&UnitReport> {
        self.groupings.values().find_map(|g| g.unit(unit_name))
    }

    /// Grouping-level dependency graph: grouping -> groupings it references.
    pub fn dependency_graph(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.groupings
            .values()
            .map(|g| (g.grouping_name.clone(), g.referenced_groupings()))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// Text rendering
// -----------------------------------------------------------------------------

fn indented(f: &mut fmt::Formatter<'_>, body: &str) -> fmt::Result {
    for line in body.lines() {
        writeln!(f, "\t{line}")?;
    }
    Ok(())
}

impl fmt::Display for UnitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----------------------UNIT------------------------")?;
        writeln!(f, "Unit Name: {}", self.unit_name)?;
        writeln!(f, "Dependency Count: {}", self.dependency_count())?;
        for (kind, edges) in self.edges_by_kind() {
            writeln!(f, "\t{kind}:")?;
            for edge in edges {
                writeln!(f, "\t{edge}")?;
            }
        }
        writeln!(f, "---------------------END-UNIT----------------------")
    }
}

impl fmt::Display for GroupingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----------------------GROUPING------------------------")?;
        writeln!(f, "Grouping Name: {}", self.grouping_name)?;
        writeln!(f, "Unit Count: {}", self.unit_count())?;
        writeln!(f, "Total Dependencies: {}", self.total_dependency_count())?;
        writeln!(f, "Unit Reports:")?;
        for unit in self.units.values() {
            indented(f, &unit.to_string())?;
        }
        writeln!(f, "---------------------END-GROUPING----------------------")
    }
}

impl fmt::Display for WholeTreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----------------------TREE------------------------")?;
        writeln!(f, "Tree Name: {}", self.tree_name)?;
        writeln!(f, "Grouping Count: {}", self.grouping_count())?;
        writeln!(f, "Unit Count: {}", self.unit_count())?;
        writeln!(f, "Total Dependencies: {}", self.total_dependency_count())?;
        writeln!(f, "Grouping dependency graph:")?;
        for (grouping, referenced) in self.dependency_graph() {
            let targets: Vec<&str> = referenced.iter().map(String::as_str).collect();
            writeln!(f, "\t{grouping} -> [{}]", targets.join(", "))?;
        }
        writeln!(f, "Grouping Reports:")?;
        for grouping in self.groupings.values() {
            indented(f, &grouping.to_string())?;
        }
        writeln!(f, "---------------------END-TREE----------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: &str, target: &str, kind: DependencyKind, line: usize) -> DependencyEdge {
        DependencyEdge::new(source, target, kind, format!("{target} x"), Some(line))
    }

    fn unit(name: &str, targets: &[&str]) -> UnitReport {
        let mut report = UnitReport::new(name);
        for (i, target) in targets.iter().enumerate() {
            report.add_dependency(edge(name, target, DependencyKind::Field, i + 1));
        }
        report
    }

    #[test]
    fn test_unit_rejects_foreign_and_self_edges() {
        let mut report = UnitReport::new("a.A");
        assert!(!report.add_dependency(edge("a.Other", "a.B", DependencyKind::Field, 1)));
        assert!(!report.add_dependency(edge("a.A", "a.A", DependencyKind::Field, 1)));
        assert!(report.add_dependency(edge("a.A", "a.B", DependencyKind::Field, 1)));
        assert!(!report.add_dependency(edge("a.A", "a.B", DependencyKind::Field, 1)));
        assert_eq!(report.dependency_count(), 1);
    }

    #[test]
    fn test_add_unit_replaces_by_name() {
        let mut grouping = GroupingReport::new("a");
        assert!(grouping.add_unit(unit("a.A", &["b.X"])).is_none());
        let replaced = grouping.add_unit(unit("a.A", &["b.X", "c.Y"]));
        assert_eq!(replaced.map(|r| r.dependency_count()), Some(1));
        assert_eq!(grouping.unit_count(), 1);
        assert_eq!(grouping.total_dependency_count(), 2);
    }

    #[test]
    fn test_grouping_totals_are_additive() {
        let mut grouping = GroupingReport::new("a");
        grouping.add_unit(unit("a.A", &["b.X", "c.Y"]));
        grouping.add_unit(unit("a.B", &["b.X"]));
        grouping.add_unit(unit("a.C", &[]));
        let sum: usize = grouping.units().values().map(UnitReport::dependency_count).sum();
        assert_eq!(grouping.total_dependency_count(), sum);
        assert_eq!(grouping.total_dependency_count(), 3);
        assert_eq!(grouping.all_dependencies().len(), 2);
    }

    #[test]
    fn test_referenced_groupings_use_last_separator() {
        let mut grouping = GroupingReport::new("a");
        grouping.add_unit(unit("a.A", &["b.X", "b.c.Y", "Bare", "b.Outer.Inner"]));
        let referenced = grouping.referenced_groupings();
        let expected: BTreeSet<String> = ["b", "b.c", "b.Outer"].iter().map(|s| s.to_string()).collect();
        assert_eq!(referenced, expected);
    }

    #[test]
    fn test_tree_aggregates_and_graph() {
        let mut a = GroupingReport::new("a");
        a.add_unit(unit("a.A", &["b.X"]));
        let mut b = GroupingReport::new("b");
        b.add_unit(unit("b.X", &[]));
        b.add_unit(unit("b.Y", &["a.A", "b.X"]));

        let mut tree = WholeTreeReport::new("proj");
        tree.add_grouping(a);
        tree.add_grouping(b.clone());
        tree.add_grouping(b);

        assert_eq!(tree.grouping_count(), 2);
        assert_eq!(tree.unit_count(), 3);
        assert_eq!(tree.total_dependency_count(), 3);
        let per_grouping: usize = tree
            .groupings()
            .values()
            .map(GroupingReport::total_dependency_count)
            .sum();
        assert_eq!(tree.total_dependency_count(), per_grouping);

        let graph = tree.dependency_graph();
        assert_eq!(graph["a"].iter().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(graph["b"].len(), 2);
        assert!(tree.unit("b.Y").is_some());
    }

    #[test]
    fn test_absorb_merges_units() {
        let mut main = GroupingReport::new("a");
        main.add_unit(unit("a.A", &["b.X"]));
        let mut other = GroupingReport::new("a");
        other.add_unit(unit("a.ATest", &["a.A"]));
        main.absorb(other);
        assert_eq!(main.unit_count(), 2);
    }

    #[test]
    fn test_rendering_lists_counts_then_edges_by_kind() {
        let mut report = UnitReport::new("a.A");
        report.add_dependency(DependencyEdge::new(
            "a.A",
            "a.Base",
            DependencyKind::Extends,
            "extends Base",
            Some(3),
        ));
        let text = report.to_string();
        assert!(text.contains("Unit Name: a.A"));
        assert!(text.contains("Dependency Count: 1"));
        assert!(text.contains("\tExtends:"));
        assert!(text.contains("a.Base (Extends: extends Base at line: 3)"));

        let mut grouping = GroupingReport::new("a");
        grouping.add_unit(report);
        let mut tree = WholeTreeReport::new("proj");
        tree.add_grouping(grouping);
        let text = tree.to_string();
        assert!(text.contains("Tree Name: proj"));
        assert!(text.contains("\ta -> [a]"));
        assert!(text.contains("\t\tUnit Name: a.A"));
    }
}
