use crate::adapters::java::jdk;
use crate::adapters::java::parser::JavaSyntaxParser;
use crate::domain::policy::is_primitive;
use crate::domain::ports::{ParseFailure, Resolution, ResolverConfigurator, TypeResolver};
use crate::domain::source_tree::SourceTree;
use crate::domain::syntax::{SyntaxTree, TypeRef};
use std::collections::HashSet;
use std::path::{Component, Path};
use std::sync::Arc;
use tracing::debug;

/// Qualified names of every type declared by a file of the tree.
///
/// A unit at `src/main/java/a/B.java` is registered under every dotted suffix
/// of its path (`B`, `a.B`, `java.a.B`, ...), so neither the analysis root nor
/// the file layout above the package directories matter.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    names: HashSet<String>,
}

impl SourceIndex {
    pub fn from_tree(tree: &SourceTree) -> Self {
        let mut index = Self::default();
        for unit in tree.units() {
            index.insert_path(unit);
        }
        index
    }

    pub fn insert_path(&mut self, path: &Path) {
        let stemmed = path.with_extension("");
        let segments: Vec<String> = stemmed
            .components()
            .filter_map(|c| match c {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        for start in 0..segments.len() {
            self.names.insert(segments[start..].join("."));
        }
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.names.contains(qualified)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Java parser plus name resolution against a frozen [`SourceIndex`].
pub struct JavaTypeResolver {
    parser: JavaSyntaxParser,
    index: SourceIndex,
}

impl JavaTypeResolver {
    pub fn new(index: SourceIndex) -> Self {
        Self {
            parser: JavaSyntaxParser,
            index,
        }
    }

    fn is_known(&self, qualified: &str) -> bool {
        if self.index.contains(qualified) {
            return true;
        }
        match qualified.rsplit_once('.') {
            Some((package, simple)) => jdk::contains(package, simple),
            None => false,
        }
    }

    fn resolve_name(&self, tree: &SyntaxTree, name: &str) -> Option<String> {
        match name.split_once('.') {
            Some((outer, rest)) => {
                if self.is_known(name) {
                    return Some(name.to_string());
                }
                // `Map.Entry`: resolve the outer type, keep the member path.
                self.resolve_simple(tree, outer)
                    .map(|qualified| format!("{qualified}.{rest}"))
            }
            None => self.resolve_simple(tree, name),
        }
    }

    fn resolve_simple(&self, tree: &SyntaxTree, name: &str) -> Option<String> {
        if let Some(declared) = tree
            .declared_types()
            .into_iter()
            .find(|qualified| qualified.rsplit('.').next() == Some(name))
        {
            return Some(declared);
        }

        let mut on_demand = Vec::new();
        for import in tree.imports.iter().filter(|i| !i.is_static) {
            if import.on_demand {
                on_demand.push(import.path.as_str());
            } else if import.path.rsplit('.').next() == Some(name) {
                return Some(import.path.clone());
            }
        }

        let same_package = tree.qualify(name);
        if self.index.contains(&same_package) {
            return Some(same_package);
        }

        for package in &on_demand {
            let candidate = format!("{package}.{name}");
            if self.index.contains(&candidate) || jdk::contains(package, name) {
                return Some(candidate);
            }
        }

        if let Some(lang) = jdk::java_lang(name) {
            return Some(lang);
        }

        // Without a classpath an unclaimed type name behind `import java.x.*`
        // is taken to live in that JDK package. Lowercase names are package
        // segments of a qualified reference.
        if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        on_demand
            .into_iter()
            .find(|package| jdk::is_jdk_package(package))
            .map(|package| format!("{package}.{name}"))
    }
}

impl TypeResolver for JavaTypeResolver {
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseFailure> {
        self.parser.parse(source)
    }

    fn resolve(&self, tree: &SyntaxTree, reference: &TypeRef) -> Resolution {
        if reference.is_array() {
            return Resolution::Unresolved;
        }
        let name = reference.erased();
        if name.is_empty() || name == "void" || is_primitive(name) {
            return Resolution::Unresolved;
        }
        match self.resolve_name(tree, name) {
            Some(qualified) => Resolution::Resolved(qualified),
            None => Resolution::Unresolved,
        }
    }
}

/// Builds one [`JavaTypeResolver`] per run from the discovered tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaResolverConfigurator;

impl ResolverConfigurator for JavaResolverConfigurator {
    fn configure(&self, tree: &SourceTree) -> Arc<dyn TypeResolver> {
        let index = SourceIndex::from_tree(tree);
        debug!(
            root = %tree.root().display(),
            names = index.len(),
            "source index built"
        );
        Arc::new(JavaTypeResolver::new(index))
    }
}
