//! Python import extraction.

use tree_sitter::Node;

use super::helpers::compact_text;
use super::ModuleSet;
use crate::config::Granularity;

/// Walk the whole tree and record every imported module name.
///
/// Imports nested in functions, classes or `try` blocks count the same as
/// top-level ones.
pub fn collect_python_imports(
    node: &Node,
    source: &[u8],
    granularity: Granularity,
    imports: &mut ModuleSet,
) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some(module) = imported_name(&name, source) {
                    record(imports, &module, granularity);
                }
            }
            return;
        }
        "import_from_statement" => {
            if let Some(module_node) = node.child_by_field_name("module_name") {
                if let Some(module) = from_module(&module_node, source) {
                    record(imports, &module, granularity);
                }
            }
            return;
        }
        "future_import_statement" => {
            record(imports, "__future__", granularity);
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_python_imports(&child, source, granularity, imports);
    }
}

/// `import a.b` → `a.b`, `import a.b as c` → `a.b`.
fn imported_name(node: &Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => non_empty(compact_text(node, source)),
        "aliased_import" => node
            .child_by_field_name("name")
            .and_then(|n| non_empty(compact_text(&n, source))),
        _ => None,
    }
}

/// Module of a `from ... import` statement. Relative imports drop their
/// leading dots; `from . import x` has no module name.
fn from_module(node: &Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => non_empty(compact_text(node, source)),
        "relative_import" => {
            let mut cursor = node.walk();
            let dotted = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "dotted_name");
            dotted.and_then(|n| non_empty(compact_text(&n, source)))
        }
        _ => None,
    }
}

fn record(imports: &mut ModuleSet, module: &str, granularity: Granularity) {
    let id = match granularity {
        Granularity::Full => module,
        Granularity::TopLevel => module.split('.').next().unwrap_or(module),
    };
    if !id.is_empty() {
        imports.insert(id.to_string());
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
