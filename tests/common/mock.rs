//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use type_deps::domain::ports::{
    ParseFailure, Resolution, ResolverConfigurator, SourceReader, TypeResolver,
};
use type_deps::domain::source_tree::SourceTree;
use type_deps::domain::syntax::{
    DeclarationKind, FieldDeclaration, MethodDeclaration, ObjectCreation, SyntaxNode, SyntaxTree,
    TypeDeclaration, TypeRef, Variable,
};

/// Mock SourceReader that serves content from an in-memory map, optionally
/// sleeping before answering.
#[derive(Default)]
pub struct MockSourceReader {
    files: HashMap<PathBuf, String>,
    delays: HashMap<PathBuf, Duration>,
    reads: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl MockSourceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    pub fn add_delay(&mut self, path: impl AsRef<Path>, delay: Duration) {
        self.delays.insert(path.as_ref().to_path_buf(), delay);
    }

    /// Number of reads started so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Most reads ever in progress at the same time.
    pub fn peak_concurrent_reads(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl SourceReader for MockSourceReader {
    fn read(&self, path: &Path) -> std::io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(path) {
            std::thread::sleep(*delay);
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }
}

/// Resolver over a line-based outline instead of real source:
///
/// ```text
/// package a
/// class A
/// extends Base
/// implements Api
/// field B b
/// returns C make
/// new D
/// !broken       <- parse failure
/// ```
///
/// Unqualified names resolve into the unit's package; `Unknown*` stays
/// unresolved.
pub struct MockTypeResolver;

impl TypeResolver for MockTypeResolver {
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseFailure> {
        let mut tree = SyntaxTree::default();
        for line in source.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(message) = line.strip_prefix('!') {
                return Err(ParseFailure::new(message));
            }
            let mut words = line.split_whitespace();
            let keyword = words.next().unwrap_or_default();
            let first = words.next().unwrap_or_default().to_string();
            let second = words.next().unwrap_or_default().to_string();
            let reference = TypeRef::new(first.clone(), Some(1));

            if keyword == "package" {
                tree.package = Some(first);
                continue;
            }
            if keyword == "class" {
                tree.declarations.push(SyntaxNode::Type(TypeDeclaration {
                    kind: DeclarationKind::Class,
                    name: first,
                    line: Some(1),
                    type_parameters: vec![],
                    extends: vec![],
                    implements: vec![],
                    members: vec![],
                }));
                continue;
            }
            let Some(SyntaxNode::Type(decl)) = tree.declarations.last_mut() else {
                return Err(ParseFailure::new(format!("`{keyword}` outside a class")));
            };
            match keyword {
                "extends" => decl.extends.push(reference),
                "implements" => decl.implements.push(reference),
                "field" => decl.members.push(SyntaxNode::Field(FieldDeclaration {
                    ty: reference,
                    variables: vec![Variable {
                        name: second,
                        line: Some(1),
                    }],
                })),
                "returns" => decl.members.push(SyntaxNode::Method(MethodDeclaration {
                    name: second,
                    line: Some(1),
                    type_parameters: vec![],
                    return_type: Some(reference),
                    parameters: vec![],
                    body: vec![],
                })),
                "new" => decl.members.push(SyntaxNode::ObjectCreation(ObjectCreation {
                    ty: reference,
                    line: Some(1),
                    children: vec![],
                })),
                other => return Err(ParseFailure::new(format!("unknown keyword `{other}`"))),
            }
        }
        Ok(tree)
    }

    fn resolve(&self, tree: &SyntaxTree, reference: &TypeRef) -> Resolution {
        let name = reference.erased();
        if name.starts_with("Unknown") || reference.is_array() {
            return Resolution::Unresolved;
        }
        if name.contains('.') {
            return Resolution::Resolved(name.to_string());
        }
        Resolution::Resolved(tree.qualify(name))
    }
}

/// Configurator handing out [`MockTypeResolver`], counting how often it is
/// asked to configure.
#[derive(Default)]
pub struct MockConfigurator {
    configured: AtomicUsize,
    last_unit_count: AtomicUsize,
}

impl MockConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_calls(&self) -> usize {
        self.configured.load(Ordering::SeqCst)
    }

    pub fn last_unit_count(&self) -> usize {
        self.last_unit_count.load(Ordering::SeqCst)
    }
}

impl ResolverConfigurator for MockConfigurator {
    fn configure(&self, tree: &SourceTree) -> Arc<dyn TypeResolver> {
        self.configured.fetch_add(1, Ordering::SeqCst);
        self.last_unit_count
            .store(tree.unit_count(), Ordering::SeqCst);
        Arc::new(MockTypeResolver)
    }
}
