//! Lowering of tree-sitter-go trees into [`SyntaxNode`]s.

use smallvec::SmallVec;
use tree_sitter::Node;

use super::{
    find_child_by_kind, node_text, Comment, ConstBlock, ConstSpec, StructField, SyntaxNode,
    TypeDecl, TypeKind,
};

/// Name from the `package` clause, if present.
pub(super) fn package_name(root: Node, content: &str) -> Option<String> {
    let clause = find_child_by_kind(root, "package_clause")?;
    find_child_by_kind(clause, "package_identifier")
        .or_else(|| find_child_by_kind(clause, "identifier"))
        .map(|n| node_text(n, content))
}

/// Walk the whole tree, collecting comments, type specs and const blocks.
///
/// Declarations nested in function bodies are visited too.
pub(super) fn lower(node: Node, content: &str, out: &mut Vec<SyntaxNode>) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "comment" => {
                out.push(SyntaxNode::Comment(Comment {
                    text: node_text(child, content).trim_end().to_string(),
                    line: line_of(child),
                }));
            }
            "type_declaration" => {
                lower_type_decl(child, content, out);
                lower(child, content, out);
            }
            "const_declaration" => {
                out.push(SyntaxNode::ConstBlock(lower_const_decl(child, content)));
                lower(child, content, out);
            }
            _ => lower(child, content, out),
        }
    }
}

fn lower_type_decl(node: Node, content: &str, out: &mut Vec<SyntaxNode>) {
    for spec in node.children(&mut node.walk()) {
        if spec.kind() != "type_spec" && spec.kind() != "type_alias" {
            continue;
        }

        let Some(name) = spec
            .child_by_field_name("name")
            .map(|n| node_text(n, content))
        else {
            continue;
        };

        let ty = spec.child_by_field_name("type");
        let kind = match ty {
            Some(ty) if ty.kind() == "struct_type" => TypeKind::Struct {
                fields: lower_struct_fields(ty, content),
            },
            Some(ty) => TypeKind::Named {
                underlying: node_text(ty, content),
            },
            None => TypeKind::Named {
                underlying: String::new(),
            },
        };

        out.push(SyntaxNode::TypeDecl(TypeDecl {
            name,
            kind,
            line: line_of(spec),
        }));
    }
}

fn lower_struct_fields(struct_type: Node, content: &str) -> Vec<StructField> {
    let Some(list) = find_child_by_kind(struct_type, "field_declaration_list") else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    for field in list.children(&mut list.walk()) {
        if field.kind() != "field_declaration" {
            continue;
        }

        let names: SmallVec<[String; 2]> = field
            .children_by_field_name("name", &mut field.walk())
            .map(|n| node_text(n, content))
            .collect();

        let ty = field
            .child_by_field_name("type")
            .map(|n| node_text(n, content))
            .unwrap_or_default();

        let tag = field
            .child_by_field_name("tag")
            .map(|n| strip_string_delimiters(&node_text(n, content)));

        fields.push(StructField { names, ty, tag });
    }
    fields
}

fn lower_const_decl(node: Node, content: &str) -> ConstBlock {
    let mut specs = Vec::new();

    for spec in node.children(&mut node.walk()) {
        if spec.kind() != "const_spec" {
            continue;
        }

        let names: SmallVec<[String; 2]> = spec
            .children_by_field_name("name", &mut spec.walk())
            .map(|n| node_text(n, content))
            .collect();

        let ty = spec
            .child_by_field_name("type")
            .map(|n| node_text(n, content));

        let has_value = spec.child_by_field_name("value").is_some();

        specs.push(ConstSpec {
            names,
            ty,
            has_value,
            line: line_of(spec),
        });
    }

    ConstBlock {
        specs,
        line: line_of(node),
    }
}

/// Strip the backticks or double quotes around a string literal.
fn strip_string_delimiters(literal: &str) -> String {
    literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .or_else(|| literal.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(literal)
        .to_string()
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}
