//! Syntax Tree - the language-neutral view of one parsed unit
//!
//! Parser adapters lower their concrete syntax into this tagged union. Only the
//! constructs that can carry a type dependency are modelled; everything else
//! collapses into [`SyntaxNode::Block`] so nested constructs stay reachable.

use serde::{Deserialize, Serialize};

/// A type reference as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Literal written text without whitespace or annotations, e.g. `List<Foo>`.
    pub written: String,
    pub line: Option<usize>,
}

impl TypeRef {
    pub fn new(written: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            written: written.into(),
            line,
        }
    }

    /// Written name with generic arguments erased: `Map.Entry<K, V>` -> `Map.Entry`.
    pub fn erased(&self) -> &str {
        match self.written.find('<') {
            Some(idx) => &self.written[..idx],
            None => &self.written,
        }
    }

    pub fn is_array(&self) -> bool {
        self.written.ends_with("[]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub line: Option<usize>,
    pub type_parameters: Vec<String>,
    /// Superclass of a class, or the extended interfaces of an interface.
    pub extends: Vec<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub ty: TypeRef,
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub ty: TypeRef,
    pub name: String,
    pub line: Option<usize>,
    /// Trimmed source text of the whole parameter.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub line: Option<usize>,
    pub type_parameters: Vec<String>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCreation {
    pub ty: TypeRef,
    pub line: Option<usize>,
    /// Argument expressions and anonymous class body members.
    pub children: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub path: String,
    pub is_static: bool,
    pub on_demand: bool,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxNode {
    Type(TypeDeclaration),
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    ObjectCreation(ObjectCreation),
    /// Any other construct that may contain relevant nodes (blocks, lambdas,
    /// initialisers, statements, expressions).
    Block(Vec<SyntaxNode>),
}

/// One parsed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub package: Option<String>,
    pub imports: Vec<ImportDeclaration>,
    pub declarations: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Name of the first top-level type declaration.
    pub fn primary_type(&self) -> Option<&str> {
        self.declarations.iter().find_map(|node| match node {
            SyntaxNode::Type(decl) => Some(decl.name.as_str()),
            _ => None,
        })
    }

    pub fn qualify(&self, simple: &str) -> String {
        match &self.package {
            Some(package) if !package.is_empty() => format!("{package}.{simple}"),
            _ => simple.to_string(),
        }
    }

    /// Qualified name of the unit: package plus primary type, or `fallback`
    /// when the unit declares no type.
    pub fn unit_name(&self, fallback: &str) -> String {
        self.qualify(self.primary_type().unwrap_or(fallback))
    }

    /// Qualified names of every type declared in this unit, nested ones included.
    pub fn declared_types(&self) -> Vec<String> {
        let mut out = Vec::new();
        for node in &self.declarations {
            collect_declared(node, self.package.as_deref().unwrap_or(""), &mut out);
        }
        out
    }
}

fn collect_declared(node: &SyntaxNode, prefix: &str, out: &mut Vec<String>) {
    match node {
        SyntaxNode::Type(decl) => {
            let qualified = if prefix.is_empty() {
                decl.name.clone()
            } else {
                format!("{prefix}.{}", decl.name)
            };
            for member in &decl.members {
                collect_declared(member, &qualified, out);
            }
            out.push(qualified);
        }
        // Local and anonymous classes are not addressable by qualified name.
        SyntaxNode::Field(_)
        | SyntaxNode::Method(_)
        | SyntaxNode::ObjectCreation(_)
        | SyntaxNode::Block(_) => {}
    }
}
