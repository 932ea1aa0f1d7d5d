//! Go frontend backed by tree-sitter.
//!
//! Produces the declaration model for:
//! - `const` / `var` declarations (single or parenthesized)
//! - `type` declarations and aliases, with the underlying type shape
//! - functions and methods
//!
//! Import declarations and the package clause are only used to position
//! comments; they do not appear in the model.

use std::path::Path;

use lazy_static::lazy_static;
use tree_sitter::{Language, Node, Parser, Query, Tree};

use super::comments::{associate, collect_groups, doc_comment, CommentGroup, Extent};
use super::{Declaration, Frontend, GroupToken, Ident, Position, SourceFile, Spec, TypeShape};
use crate::error::ParseError;

/// Maximum length of the source excerpt quoted in syntax errors.
const SNIPPET_LEN: usize = 24;

lazy_static! {
    static ref GO_LANGUAGE: Language = tree_sitter_go::LANGUAGE.into();

    /// Every comment in a file, compiled once for all files.
    static ref COMMENT_QUERY: Query =
        Query::new(&GO_LANGUAGE, "(comment) @comment").expect("comment query compiles");
}

/// Top-level node kinds allowed after the package clause.
const TOP_LEVEL_KINDS: &[&str] = &[
    "import_declaration",
    "const_declaration",
    "var_declaration",
    "type_declaration",
    "function_declaration",
    "method_declaration",
];

/// Go language frontend.
pub struct GoFrontend {
    language: Language,
}

impl GoFrontend {
    /// Create a new Go frontend.
    pub fn new() -> Self {
        Self {
            language: GO_LANGUAGE.clone(),
        }
    }

    /// Create a new parser for this call.
    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    fn parse_tree(&self, path: &Path, source: &[u8]) -> Result<Tree, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Aborted {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            return Err(syntax_error(path, bad, source));
        }
        check_layout(path, root, source)?;

        Ok(tree)
    }

    /// Build the declaration model from a clean tree.
    fn extract(&self, path: &Path, tree: &Tree, source: &[u8]) -> Result<SourceFile, ParseError> {
        let root = tree.root_node();
        let groups = collect_groups(&COMMENT_QUERY, root, source);

        let top_level: Vec<Node> = root
            .named_children(&mut root.walk())
            .filter(|n| n.kind() != "comment")
            .collect();
        let extents: Vec<Extent> = top_level.iter().map(|n| Extent::of(*n)).collect();
        let owned = associate(&groups, &extents);

        let mut declarations = Vec::new();
        for (node, group_ids) in top_level.iter().zip(owned) {
            let comments: Vec<CommentGroup> =
                group_ids.into_iter().map(|i| groups[i].clone()).collect();

            let decl = match node.kind() {
                "function_declaration" | "method_declaration" => {
                    self.func(*node, source, &groups, comments)
                }
                kind => group_token(kind)
                    .map(|token| self.group(*node, token, source, &groups, comments)),
            };

            if let Some(decl) = decl {
                declarations.push(decl);
            }
        }

        Ok(SourceFile {
            path: path.to_path_buf(),
            declarations,
        })
    }

    /// Build a `const`/`var`/`type` declaration.
    fn group(
        &self,
        node: Node,
        token: GroupToken,
        source: &[u8],
        groups: &[CommentGroup],
        comments: Vec<CommentGroup>,
    ) -> Declaration {
        let mut spec_nodes = Vec::new();
        let mut parenthesized = false;

        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "(" => parenthesized = true,
                "const_spec" | "var_spec" | "type_spec" | "type_alias" => spec_nodes.push(child),
                "var_spec_list" => {
                    for inner in child.children(&mut child.walk()) {
                        match inner.kind() {
                            "(" => parenthesized = true,
                            "var_spec" => spec_nodes.push(inner),
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        let specs = spec_nodes
            .into_iter()
            .filter_map(|spec| {
                let doc = if parenthesized {
                    doc_comment(
                        groups,
                        source,
                        spec.start_byte(),
                        spec.start_position().row + 1,
                    )
                    .cloned()
                } else {
                    None
                };
                self.spec(spec, source, doc)
            })
            .collect();

        Declaration::Group {
            token,
            specs,
            comments,
        }
    }

    fn spec(&self, node: Node, source: &[u8], doc: Option<CommentGroup>) -> Option<Spec> {
        match node.kind() {
            "const_spec" | "var_spec" => {
                let names = node
                    .children_by_field_name("name", &mut node.walk())
                    .map(|n| ident(n, source))
                    .collect();
                Some(Spec::Value { names, doc })
            }
            "type_spec" | "type_alias" => {
                let name = ident(node.child_by_field_name("name")?, source);
                let shape = node
                    .child_by_field_name("type")
                    .map(type_shape)
                    .unwrap_or(TypeShape::Other);
                Some(Spec::Type { name, shape, doc })
            }
            _ => None,
        }
    }

    /// Build a function or method declaration.
    fn func(
        &self,
        node: Node,
        source: &[u8],
        groups: &[CommentGroup],
        comments: Vec<CommentGroup>,
    ) -> Option<Declaration> {
        let name = ident(node.child_by_field_name("name")?, source);

        let receivers = node
            .child_by_field_name("receiver")
            .map(|list| {
                list.named_children(&mut list.walk())
                    .filter(|p| p.kind() != "comment")
                    .count()
            })
            .unwrap_or(0);

        let doc = doc_comment(groups, source, node.start_byte(), node.start_position().row + 1)
            .cloned();

        Some(Declaration::Func {
            name,
            receivers,
            doc,
            comments,
        })
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for GoFrontend {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<SourceFile, ParseError> {
        if std::str::from_utf8(source).is_err() {
            return Err(ParseError::Encoding {
                path: path.to_path_buf(),
            });
        }

        let tree = self.parse_tree(path, source)?;
        self.extract(path, &tree, source)
    }
}

fn ident(node: Node, source: &[u8]) -> Ident {
    Ident {
        name: node.utf8_text(source).unwrap_or("").to_string(),
        position: Position::from_point(node.start_position()),
    }
}

fn group_token(kind: &str) -> Option<GroupToken> {
    match kind {
        "const_declaration" => Some(GroupToken::Const),
        "var_declaration" => Some(GroupToken::Var),
        "type_declaration" => Some(GroupToken::Type),
        _ => None,
    }
}

fn type_shape(node: Node) -> TypeShape {
    match node.kind() {
        "struct_type" => TypeShape::Struct,
        "interface_type" => TypeShape::Interface,
        "function_type" => TypeShape::FuncType,
        _ => TypeShape::Other,
    }
}

/// Reject files the grammar tolerates but Go does not: a missing or
/// misplaced package clause, top-level statements, and imports after other
/// declarations.
fn check_layout(path: &Path, root: Node, source: &[u8]) -> Result<(), ParseError> {
    let mut cursor = root.walk();
    let mut nodes = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment");

    match nodes.next() {
        Some(first) if first.kind() == "package_clause" => {}
        Some(first) => return Err(syntax_error(path, first, source)),
        None => {
            // Nothing but comments: Go expects `package` at end of file.
            let pos = Position::from_point(root.end_position());
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: pos.line,
                column: pos.column,
                snippet: String::new(),
            });
        }
    }

    let mut imports_done = false;
    for node in nodes {
        let kind = node.kind();
        if !TOP_LEVEL_KINDS.contains(&kind) || (kind == "import_declaration" && imports_done) {
            return Err(syntax_error(path, node, source));
        }
        if kind != "import_declaration" {
            imports_done = true;
        }
    }

    Ok(())
}

/// Syntax error at `node`, quoting the start of its first line.
fn syntax_error(path: &Path, node: Node, source: &[u8]) -> ParseError {
    let snippet: String = node
        .utf8_text(source)
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(SNIPPET_LEN)
        .collect();
    let pos = Position::from_point(node.start_position());
    ParseError::Syntax {
        path: path.to_path_buf(),
        line: pos.line,
        column: pos.column,
        snippet,
    }
}

/// First ERROR or MISSING node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_go(source: &str) -> SourceFile {
        GoFrontend::new()
            .parse(Path::new("test.go"), source.as_bytes())
            .unwrap()
    }

    fn func<'a>(file: &'a SourceFile, wanted: &str) -> &'a Declaration {
        file.declarations
            .iter()
            .find(|d| matches!(d, Declaration::Func { name, .. } if name.name == wanted))
            .unwrap_or_else(|| panic!("no func {wanted}"))
    }

    #[test]
    fn test_functions_and_methods() {
        let source = r#"
package main

type Config struct {
    Name string
}

func (c *Config) Validate() error {
    return nil
}

func main() {
}
"#;
        let file = parse_go(source);
        assert_eq!(file.declarations.len(), 3);

        match func(&file, "Validate") {
            Declaration::Func { name, receivers, .. } => {
                assert_eq!(*receivers, 1);
                assert_eq!(name.position.line, 8);
            }
            _ => unreachable!(),
        }
        match func(&file, "main") {
            Declaration::Func { receivers, .. } => assert_eq!(*receivers, 0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_type_shapes() {
        let source = r#"
package shapes

type (
    S struct{}
    I interface{ Run() error }
    F func(int) error
    N int
    A = struct{}
    G[T any] struct{ v T }
)
"#;
        let file = parse_go(source);
        let specs = match &file.declarations[0] {
            Declaration::Group {
                token: GroupToken::Type,
                specs,
                ..
            } => specs,
            other => panic!("unexpected {other:?}"),
        };

        let shapes: Vec<_> = specs
            .iter()
            .map(|s| match s {
                Spec::Type { name, shape, .. } => (name.name.as_str(), *shape),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            shapes,
            vec![
                ("S", TypeShape::Struct),
                ("I", TypeShape::Interface),
                ("F", TypeShape::FuncType),
                ("N", TypeShape::Other),
                ("A", TypeShape::Struct),
                ("G", TypeShape::Struct),
            ]
        );
    }

    #[test]
    fn test_value_spec_names() {
        let source = r#"
package vals

var A, b, C = 1, 2, 3

const (
    X = iota
    Y
)
"#;
        let file = parse_go(source);
        assert_eq!(file.declarations.len(), 2);

        match &file.declarations[0] {
            Declaration::Group {
                token: GroupToken::Var,
                specs,
                ..
            } => match &specs[0] {
                Spec::Value { names, .. } => {
                    let names: Vec<_> = names.iter().map(|n| n.name.as_str()).collect();
                    assert_eq!(names, vec!["A", "b", "C"]);
                }
                _ => unreachable!(),
            },
            other => panic!("unexpected {other:?}"),
        }

        match &file.declarations[1] {
            Declaration::Group {
                token: GroupToken::Const,
                specs,
                ..
            } => assert_eq!(specs.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_func_doc_comment() {
        let source = "package p\n\n// Foo does X.\nfunc Foo() {}\n\nfunc Bar() {}\n";
        let file = parse_go(source);

        match func(&file, "Foo") {
            Declaration::Func { doc, comments, .. } => {
                assert_eq!(doc.as_ref().unwrap().text(), "Foo does X.");
                assert_eq!(comments.len(), 1);
            }
            _ => unreachable!(),
        }
        match func(&file, "Bar") {
            Declaration::Func { doc, comments, .. } => {
                assert!(doc.is_none());
                assert!(comments.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_package_doc_not_on_first_decl() {
        let source = "// Package p does things.\npackage p\n\nfunc First() {}\n";
        let file = parse_go(source);

        match func(&file, "First") {
            Declaration::Func { doc, comments, .. } => {
                assert!(doc.is_none());
                assert!(comments.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_group_comment_inside_parens() {
        let source = "package p\n\nconst (\n    // doc\n    A = 1\n    B = 2\n)\n";
        let file = parse_go(source);

        match &file.declarations[0] {
            Declaration::Group {
                specs, comments, ..
            } => {
                assert_eq!(comments.len(), 1);
                assert!(specs[0].doc().is_some());
                assert!(specs[1].doc().is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_trailing_comment_is_not_doc() {
        let source = "package p\n\nvar x = 1 // note\nfunc Next() {}\n";
        let file = parse_go(source);

        match func(&file, "Next") {
            Declaration::Func { doc, comments, .. } => {
                assert!(doc.is_none());
                assert!(comments.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_syntax_error_rejected() {
        let err = GoFrontend::new()
            .parse(Path::new("bad.go"), b"package p\n\nfunc Broken( {\n")
            .unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert!(line >= 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = GoFrontend::new()
            .parse(Path::new("bin.go"), b"package p\n\nvar X = \"\xff\xfe\"\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Encoding { .. }));
    }
}
