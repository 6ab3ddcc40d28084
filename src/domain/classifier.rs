//! Dependency Classifier - turns one resolved syntax tree into a unit report.
//!
//! Kind mapping (single traversal, see [`DependencyClassifier::visit`]):
//!
//! | construct                       | target                       | kind              |
//! |---------------------------------|------------------------------|-------------------|
//! | supertype clause                | named supertype              | `Extends`         |
//! | interface-implementation clause | each named interface         | `Implements`      |
//! | field declaration               | declared type, per variable  | `Field`           |
//! | method declaration              | return type                  | `MethodReturn`    |
//! | method/constructor parameter    | parameter type               | `MethodParameter` |
//! | object creation                 | constructed type             | `Instantiation`   |
//! | single-type import (opt-in)     | imported type                | `Import`          |

use crate::domain::edge::{DependencyEdge, DependencyKind};
use crate::domain::policy::ExclusionPolicy;
use crate::domain::ports::TypeResolver;
use crate::domain::report::UnitReport;
use crate::domain::syntax::{SyntaxNode, SyntaxTree, TypeRef};

const MAX_SNIPPET_LEN: usize = 80;

pub struct DependencyClassifier<'a> {
    resolver: &'a dyn TypeResolver,
    policy: &'a ExclusionPolicy,
}

struct Visit<'t> {
    tree: &'t SyntaxTree,
    report: UnitReport,
    /// Type parameters in scope, innermost last.
    type_scope: Vec<&'t str>,
}

impl<'a> DependencyClassifier<'a> {
    pub fn new(resolver: &'a dyn TypeResolver, policy: &'a ExclusionPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Classify every dependency of `tree`, attributed to `unit_name`.
    pub fn classify(&self, tree: &SyntaxTree, unit_name: &str) -> UnitReport {
        let mut visit = Visit {
            tree,
            report: UnitReport::new(unit_name),
            type_scope: Vec::new(),
        };

        if self.policy.include_imports() {
            for import in tree.imports.iter().filter(|i| !i.is_static && !i.on_demand) {
                let reference = TypeRef::new(import.path.clone(), import.line);
                self.emit(
                    &mut visit,
                    &reference,
                    DependencyKind::Import,
                    format!("import {}", import.path),
                    import.line,
                );
            }
        }

        for node in &tree.declarations {
            self.visit(&mut visit, node);
        }
        visit.report
    }

    fn visit<'t>(&self, visit: &mut Visit<'t>, node: &'t SyntaxNode) {
        match node {
            SyntaxNode::Type(decl) => {
                for ty in &decl.extends {
                    let snippet = format!("extends {}", ty.written);
                    self.emit(visit, ty, DependencyKind::Extends, snippet, ty.line);
                }
                for ty in &decl.implements {
                    let snippet = format!("implements {}", ty.written);
                    self.emit(visit, ty, DependencyKind::Implements, snippet, ty.line);
                }
                let scope_len = visit.type_scope.len();
                visit
                    .type_scope
                    .extend(decl.type_parameters.iter().map(String::as_str));
                for member in &decl.members {
                    self.visit(visit, member);
                }
                visit.type_scope.truncate(scope_len);
            }
            SyntaxNode::Field(field) => {
                for variable in &field.variables {
                    let snippet = format!("{} {}", field.ty.written, variable.name);
                    self.emit(visit, &field.ty, DependencyKind::Field, snippet, variable.line);
                }
            }
            SyntaxNode::Method(method) => {
                let scope_len = visit.type_scope.len();
                visit
                    .type_scope
                    .extend(method.type_parameters.iter().map(String::as_str));
                if let Some(ret) = &method.return_type {
                    let snippet = format!("{} {}()", ret.written, method.name);
                    self.emit(visit, ret, DependencyKind::MethodReturn, snippet, ret.line);
                }
                for param in &method.parameters {
                    self.emit(
                        visit,
                        &param.ty,
                        DependencyKind::MethodParameter,
                        param.text.clone(),
                        param.line,
                    );
                }
                for child in &method.body {
                    self.visit(visit, child);
                }
                visit.type_scope.truncate(scope_len);
            }
            SyntaxNode::ObjectCreation(creation) => {
                let snippet = format!("new {}()", creation.ty.written);
                self.emit(
                    visit,
                    &creation.ty,
                    DependencyKind::Instantiation,
                    snippet,
                    creation.line,
                );
                for child in &creation.children {
                    self.visit(visit, child);
                }
            }
            SyntaxNode::Block(children) => {
                for child in children {
                    self.visit(visit, child);
                }
            }
        }
    }

    fn emit(
        &self,
        visit: &mut Visit<'_>,
        reference: &TypeRef,
        kind: DependencyKind,
        snippet: String,
        line: Option<usize>,
    ) {
        // Not syntactically determinable: skipped, not an error.
        let erased = reference.erased();
        if erased.is_empty() || visit.type_scope.iter().any(|param| *param == erased) {
            return;
        }
        let target = self.resolver.resolve(visit.tree, reference).or_written(reference);
        if !self.policy.should_include(&target, visit.report.unit_name()) {
            return;
        }
        let edge = DependencyEdge::new(
            visit.report.unit_name(),
            target,
            kind,
            truncate_snippet(snippet),
            line,
        );
        visit.report.add_dependency(edge);
    }
}

fn truncate_snippet(snippet: String) -> String {
    let snippet = snippet.split_whitespace().collect::<Vec<_>>().join(" ");
    if snippet.chars().count() <= MAX_SNIPPET_LEN {
        return snippet;
    }
    let mut short: String = snippet.chars().take(MAX_SNIPPET_LEN - 3).collect();
    short.push_str("...");
    short
}
