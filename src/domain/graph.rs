use crate::domain::edge::DependencyKind;
use crate::domain::report::WholeTreeReport;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed dependency graph derived from a [`WholeTreeReport`], for export to
/// rendering tools.
pub struct DependencyGraph {
    /// Node weight is the display label; edge weight the dependency kinds
    /// seen between the two endpoints (empty at grouping level).
    pub graph: DiGraph<String, Vec<DependencyKind>>,

    /// Mapping from qualified name to node index
    pub name_to_node: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_to_node: HashMap::new(),
        }
    }

    /// One node per grouping, one edge per referenced grouping. Self
    /// references are dropped.
    pub fn groupings(report: &WholeTreeReport) -> Self {
        let mut graph = Self::new();
        for (grouping, referenced) in report.dependency_graph() {
            let source = graph.get_or_create_node(&grouping, &grouping);
            for target_name in referenced.iter().filter(|r| **r != grouping) {
                let target = graph.get_or_create_node(target_name, target_name);
                graph.graph.update_edge(source, target, Vec::new());
            }
        }
        graph
    }

    /// One node per unit and per referenced type, labelled with simple names.
    pub fn units(report: &WholeTreeReport) -> Self {
        let mut graph = Self::new();
        for grouping in report.groupings().values() {
            for unit in grouping.units().values() {
                let source = graph.get_or_create_node(unit.unit_name(), simple_name(unit.unit_name()));
                for edge in unit.edges() {
                    let target =
                        graph.get_or_create_node(&edge.target_type, simple_name(&edge.target_type));
                    graph.add_kind(source, target, edge.kind);
                }
            }
        }
        graph
    }

    fn get_or_create_node(&mut self, name: &str, label: &str) -> NodeIndex {
        if let Some(&idx) = self.name_to_node.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.name_to_node.insert(name.to_string(), idx);
        idx
    }

    fn add_kind(&mut self, source: NodeIndex, target: NodeIndex, kind: DependencyKind) {
        match self.graph.find_edge(source, target) {
            Some(edge) => {
                let kinds = &mut self.graph[edge];
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            None => {
                self.graph.add_edge(source, target, vec![kind]);
            }
        }
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_node.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Graphviz DOT rendering.
    pub fn to_dot(&self) -> String {
        let labelled = self.graph.map(
            |_, label| label.clone(),
            |_, kinds| {
                kinds
                    .iter()
                    .map(DependencyKind::label)
                    .collect::<Vec<_>>()
                    .join(",")
            },
        );
        let content = format!("{}", Dot::with_config(&labelled, &[Config::GraphContentOnly]));
        let mut out = String::from("digraph {\n");
        for line in content.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// `com.acme.Widget` -> `Widget`.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}
