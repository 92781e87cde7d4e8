//! Import carry-over
//!
//! A generated stub repeats the source signatures verbatim, so it needs the
//! imports those signatures reference (`context.Context`, `time.Time`, ...).
//! Only imports that are actually referenced are kept: Go rejects unused ones.

use crate::error::MockError;
use crate::parser::go_syntax::parse_source;
use crate::parser::types::{ImportSpec, MethodDescriptor};

/// All imports declared in `source`, in declaration order
pub fn source_imports(source: &str) -> Result<Vec<ImportSpec>, MockError> {
    let tree = parse_source(source).map_err(MockError::TreeSitter)?;
    let root = tree.root_node();
    let mut imports = Vec::new();

    let mut cursor = root.walk();
    for declaration in root.named_children(&mut cursor) {
        if declaration.kind() == "import_declaration" {
            collect_import_specs(declaration, source, &mut imports);
        }
    }

    Ok(imports)
}

/// Import declaration tree structure:
/// ```text
/// import_declaration
///   import_spec                 <- import "context"
///     path: interpreted_string_literal
///   import_spec_list            <- import ( ... )
///     import_spec
///       name: package_identifier | blank_identifier | dot
///       path: interpreted_string_literal
/// ```
fn collect_import_specs(node: tree_sitter::Node, source: &str, imports: &mut Vec<ImportSpec>) {
    if node.kind() == "import_spec" {
        let Some(path_node) = node.child_by_field_name("path") else {
            return;
        };
        let path = source[path_node.byte_range()]
            .trim_matches(|c| c == '"' || c == '`')
            .to_string();
        let alias = node
            .child_by_field_name("name")
            .map(|name| source[name.byte_range()].to_string());
        imports.push(ImportSpec { alias, path });
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_import_specs(child, source, imports);
    }
}

/// Imports whose package name appears as a qualifier in any method signature
pub fn referenced_imports(imports: &[ImportSpec], methods: &[MethodDescriptor]) -> Vec<ImportSpec> {
    imports
        .iter()
        .filter(|import| {
            import.package_name().is_some_and(|package| {
                methods.iter().any(|method| {
                    mentions_package(&method.params, package)
                        || mentions_package(&method.returns, package)
                })
            })
        })
        .cloned()
        .collect()
}

/// Whether `text` contains `package.` not preceded by an identifier character
fn mentions_package(text: &str, package: &str) -> bool {
    let qualifier = format!("{}.", package);
    text.match_indices(&qualifier).any(|(i, _)| {
        text[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !(c == '_' || c.is_alphanumeric()))
    })
}
