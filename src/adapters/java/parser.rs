//! Java syntax adapter
//!
//! Parses Java with tree-sitter and lowers the concrete syntax tree into the
//! [`SyntaxTree`] consumed by the classifier. Constructs that cannot carry a
//! type dependency are dropped; their descendants are still visited.

use crate::domain::ports::ParseFailure;
use crate::domain::syntax::{
    DeclarationKind, FieldDeclaration, ImportDeclaration, MethodDeclaration, ObjectCreation,
    Parameter, SyntaxNode, SyntaxTree, TypeDeclaration, TypeRef, Variable,
};
use std::cell::Cell;
use tree_sitter::{Node, Parser};

/// Declarations, blocks and object creations nested deeper than this are
/// rejected instead of lowered.
const MAX_NESTING: usize = 200;

/// Stateless: a fresh tree-sitter parser is created per call, so one
/// instance can be shared by concurrent tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaSyntaxParser;

impl JavaSyntaxParser {
    pub fn parse(&self, source: &str) -> Result<SyntaxTree, ParseFailure> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ParseFailure::new(format!("failed to load Java grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseFailure::new("parser produced no syntax tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseFailure::new(describe_error(root)));
        }

        let lowering = Lowering::new(source);
        let tree = lowering.program(root);
        match lowering.too_deep.get() {
            Some(line) => Err(ParseFailure::new(format!(
                "nesting deeper than {MAX_NESTING} levels at line {line}"
            ))),
            None => Ok(tree),
        }
    }
}

fn describe_error(root: Node) -> String {
    match first_error(root) {
        Some(node) if node.is_missing() => format!(
            "missing `{}` at line {}, column {}",
            node.kind(),
            node.start_position().row + 1,
            node.start_position().column + 1
        ),
        Some(node) => format!(
            "syntax error at line {}, column {}",
            node.start_position().row + 1,
            node.start_position().column + 1
        ),
        None => "syntax error".to_string(),
    }
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            push_reversed(&mut pending, children(node));
        }
    }
    None
}

/// Push so that the first child is popped first.
fn push_reversed<'t>(pending: &mut Vec<Node<'t>>, nodes: Vec<Node<'t>>) {
    pending.extend(nodes.into_iter().rev());
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn line(node: Node) -> Option<usize> {
    Some(node.start_position().row + 1)
}

fn is_annotation(node: Node) -> bool {
    matches!(node.kind(), "annotation" | "marker_annotation")
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment" | "comment")
}

struct Lowering<'s> {
    source: &'s str,
    depth: Cell<usize>,
    /// Line of the first construct skipped for exceeding [`MAX_NESTING`].
    too_deep: Cell<Option<usize>>,
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            depth: Cell::new(0),
            too_deep: Cell::new(None),
        }
    }

    /// Run `lower` one nesting level deeper, or skip it past the limit.
    fn nested<T>(&self, node: Node, lower: impl FnOnce() -> T) -> Option<T> {
        let depth = self.depth.get();
        if depth >= MAX_NESTING {
            if self.too_deep.get().is_none() {
                self.too_deep.set(Some(node.start_position().row + 1));
            }
            return None;
        }
        self.depth.set(depth + 1);
        let lowered = lower();
        self.depth.set(depth);
        Some(lowered)
    }

    fn text(&self, node: Node) -> &'s str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn program(&self, root: Node) -> SyntaxTree {
        let mut tree = SyntaxTree::default();
        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    tree.package = named_children(child)
                        .into_iter()
                        .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                        .map(|n| self.text(n).to_string());
                }
                "import_declaration" => tree.imports.push(self.import(child)),
                _ => self.lower_into(child, &mut tree.declarations),
            }
        }
        tree
    }

    fn import(&self, node: Node) -> ImportDeclaration {
        let mut import = ImportDeclaration {
            path: String::new(),
            is_static: false,
            on_demand: false,
            line: line(node),
        };
        for child in children(node) {
            match child.kind() {
                "static" => import.is_static = true,
                "asterisk" => import.on_demand = true,
                "identifier" | "scoped_identifier" => import.path = self.text(child).to_string(),
                _ => {}
            }
        }
        import
    }

    /// Written type text with whitespace, comments and annotations removed.
    fn type_ref(&self, node: Node) -> TypeRef {
        let mut written = String::new();
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if is_annotation(current) || is_comment(current) {
                continue;
            }
            if current.child_count() == 0 {
                written.push_str(self.text(current).trim());
            } else {
                push_reversed(&mut pending, children(current));
            }
        }
        TypeRef::new(written, line(node))
    }

    fn type_parameters(&self, node: Node) -> Vec<String> {
        let Some(params) = named_children(node)
            .into_iter()
            .find(|n| n.kind() == "type_parameters")
        else {
            return Vec::new();
        };
        named_children(params)
            .into_iter()
            .filter(|n| n.kind() == "type_parameter")
            .filter_map(|param| {
                named_children(param)
                    .into_iter()
                    .find(|n| matches!(n.kind(), "type_identifier" | "identifier"))
                    .map(|n| self.text(n).to_string())
            })
            .collect()
    }

    /// Types of an `extends`/`implements` clause.
    fn clause_types(&self, clause: Node) -> Vec<TypeRef> {
        named_children(clause)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "type_list" {
                    named_children(child)
                } else {
                    vec![child]
                }
            })
            .filter(|ty| !is_annotation(*ty) && !is_comment(*ty))
            .map(|ty| self.type_ref(ty))
            .collect()
    }

    fn lower_children(&self, node: Node) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        for child in named_children(node) {
            self.lower_into(child, &mut out);
        }
        out
    }

    /// Pre-order walk with an explicit stack: expression chains such as long
    /// string concatenations nest one CST level per operator. Only the kinds
    /// kept in the lowered tree recurse.
    fn lower_into(&self, node: Node, out: &mut Vec<SyntaxNode>) {
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            match node.kind() {
                "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | "annotation_type_declaration" => {
                    if let Some(Some(decl)) = self.nested(node, || self.type_declaration(node)) {
                        out.push(SyntaxNode::Type(decl));
                    }
                }
                "field_declaration" | "constant_declaration" => self.field(node, out),
                "method_declaration"
                | "constructor_declaration"
                | "compact_constructor_declaration"
                | "annotation_type_element_declaration" => {
                    if let Some(method) = self.nested(node, || self.method(node)) {
                        out.push(SyntaxNode::Method(method));
                    }
                }
                "object_creation_expression" => {
                    if let Some(creation) = self.nested(node, || self.object_creation(node)) {
                        out.push(creation);
                    }
                }
                "block" | "constructor_body" | "static_initializer" | "lambda_expression" => {
                    if let Some(inner) = self.nested(node, || self.lower_children(node))
                        && !inner.is_empty()
                    {
                        out.push(SyntaxNode::Block(inner));
                    }
                }
                _ => push_reversed(&mut pending, named_children(node)),
            }
        }
    }

    fn type_declaration(&self, node: Node) -> Option<TypeDeclaration> {
        let kind = match node.kind() {
            "class_declaration" => DeclarationKind::Class,
            "interface_declaration" => DeclarationKind::Interface,
            "enum_declaration" => DeclarationKind::Enum,
            "record_declaration" => DeclarationKind::Record,
            "annotation_type_declaration" => DeclarationKind::Annotation,
            _ => return None,
        };
        let name = self.text(node.child_by_field_name("name")?).to_string();

        let mut decl = TypeDeclaration {
            kind,
            name,
            line: line(node),
            type_parameters: self.type_parameters(node),
            extends: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
        };

        for child in named_children(node) {
            match child.kind() {
                "superclass" | "extends_interfaces" => decl.extends.extend(self.clause_types(child)),
                "super_interfaces" => decl.implements.extend(self.clause_types(child)),
                _ => {}
            }
        }

        // Record components behave as fields.
        if kind == DeclarationKind::Record
            && let Some(components) = node.child_by_field_name("parameters")
        {
            for param in self.parameters(components) {
                decl.members.push(SyntaxNode::Field(FieldDeclaration {
                    ty: param.ty,
                    variables: vec![Variable {
                        name: param.name,
                        line: param.line,
                    }],
                }));
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            decl.members.extend(self.lower_children(body));
        }
        Some(decl)
    }

    fn field(&self, node: Node, out: &mut Vec<SyntaxNode>) {
        let Some(ty) = node.child_by_field_name("type") else {
            return;
        };
        let declarators: Vec<Node> = {
            let mut cursor = node.walk();
            node.children_by_field_name("declarator", &mut cursor).collect()
        };
        let base = self.type_ref(ty);

        // `B one, many[];` declares two types: one declaration per written type.
        let mut fields: Vec<FieldDeclaration> = Vec::new();
        for declarator in &declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let mut reference = base.clone();
            if let Some(dims) = declarator.child_by_field_name("dimensions") {
                reference.written.push_str(&self.dimensions(dims));
            }
            let variable = Variable {
                name: self.text(name).to_string(),
                line: line(name),
            };
            match fields.iter().position(|f| f.ty.written == reference.written) {
                Some(idx) => fields[idx].variables.push(variable),
                None => fields.push(FieldDeclaration {
                    ty: reference,
                    variables: vec![variable],
                }),
            }
        }
        out.extend(fields.into_iter().map(SyntaxNode::Field));

        // Initialisers may construct objects.
        for declarator in declarators {
            if let Some(value) = declarator.child_by_field_name("value") {
                self.lower_into(value, out);
            }
        }
    }

    /// `[ ] []` as `[][]`.
    fn dimensions(&self, dims: Node) -> String {
        self.text(dims).split_whitespace().collect()
    }

    fn method(&self, node: Node) -> MethodDeclaration {
        let return_type = match node.kind() {
            "method_declaration" | "annotation_type_element_declaration" => {
                node.child_by_field_name("type").map(|ty| self.type_ref(ty))
            }
            _ => None,
        };
        MethodDeclaration {
            name: node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string())
                .unwrap_or_default(),
            line: line(node),
            type_parameters: self.type_parameters(node),
            return_type,
            parameters: node
                .child_by_field_name("parameters")
                .map(|params| self.parameters(params))
                .unwrap_or_default(),
            body: node
                .child_by_field_name("body")
                .map(|body| self.lower_children(body))
                .unwrap_or_default(),
        }
    }

    fn parameters(&self, list: Node) -> Vec<Parameter> {
        named_children(list)
            .into_iter()
            .filter_map(|param| match param.kind() {
                "formal_parameter" => {
                    let ty = param.child_by_field_name("type")?;
                    let mut reference = self.type_ref(ty);
                    // C-style `Foo bar[]`
                    if let Some(dims) = param.child_by_field_name("dimensions") {
                        reference.written.push_str(&self.dimensions(dims));
                    }
                    Some(Parameter {
                        ty: reference,
                        name: param
                            .child_by_field_name("name")
                            .map(|n| self.text(n).to_string())
                            .unwrap_or_default(),
                        line: line(param),
                        text: self.text(param).trim().to_string(),
                    })
                }
                "spread_parameter" => {
                    let parts = named_children(param);
                    let ty = parts
                        .iter()
                        .find(|n| n.kind() != "modifiers" && !is_annotation(**n) && !is_comment(**n))?;
                    let name = parts
                        .iter()
                        .find(|n| n.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"))
                        .map(|n| self.text(n).to_string())
                        .unwrap_or_default();
                    Some(Parameter {
                        ty: self.type_ref(*ty),
                        name,
                        line: line(param),
                        text: self.text(param).trim().to_string(),
                    })
                }
                _ => None,
            })
            .collect()
    }

    fn object_creation(&self, node: Node) -> SyntaxNode {
        let ty = node.child_by_field_name("type");
        let mut children = Vec::new();
        for child in named_children(node) {
            if ty.is_some_and(|ty| ty.id() == child.id()) {
                continue;
            }
            self.lower_into(child, &mut children);
        }
        match ty {
            Some(ty) => SyntaxNode::ObjectCreation(ObjectCreation {
                ty: self.type_ref(ty),
                line: line(node),
                children,
            }),
            None => SyntaxNode::Block(children),
        }
    }
}
