//! Go grammar helpers backed by tree-sitter-go

use tracing::warn;
use tree_sitter::{Node, Point, Tree};

use crate::error::MockError;

/// Reserved words of the Go language
pub const KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Predeclared type identifiers
pub const PREDECLARED_TYPES: [&str; 22] = [
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

pub fn is_predeclared_type(s: &str) -> bool {
    PREDECLARED_TYPES.contains(&s)
}

/// Parse Go source text into a syntax tree
pub fn parse_source(source: &str) -> Result<Tree, String> {
    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_go::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set Go language for tree-sitter: {}", e);
        e.to_string()
    })?;

    parser.parse(source, None).ok_or_else(|| {
        warn!("Failed to parse Go source");
        "Failed to parse Go source".to_string()
    })
}

/// Position of the first ERROR or MISSING node, if the tree has any
pub fn first_syntax_error(node: Node) -> Option<Point> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node.start_position());
    }

    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find_map(first_syntax_error)
        .or(Some(node.start_position()))
}

/// First node of the given kind in pre-order
pub fn find_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    if node.kind() == kind {
        return Some(node);
    }

    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find_map(|child| find_kind(child, kind))
}

/// Whether any parameter of `func(<params>) <returns>` carries a name
///
/// Token splitting can't tell `a, b int` from `pkg.A, []B`, so the signature is
/// parsed as a function type and the parameter declarations are inspected.
pub fn has_named_params(raw_params: &str, raw_returns: &str) -> Result<bool, MockError> {
    let signature = format!("func({}) {}", raw_params, raw_returns)
        .trim_end()
        .to_string();
    let source = format!("package p\n\nvar signature {}\n", signature);

    let tree = parse_source(&source).map_err(MockError::TreeSitter)?;
    let root = tree.root_node();

    if first_syntax_error(root).is_some() {
        return Err(MockError::InvalidSignature {
            signature,
            reason: "not a valid function type".to_string(),
        });
    }

    let Some(func_type) = find_kind(root, "function_type") else {
        return Err(MockError::InvalidSignature {
            signature,
            reason: "not a function type".to_string(),
        });
    };

    let Some(params) = func_type.child_by_field_name("parameters") else {
        return Ok(false);
    };

    let mut cursor = params.walk();
    let named = params
        .named_children(&mut cursor)
        .any(|param| param.child_by_field_name("name").is_some());
    Ok(named)
}
