//
//  helpers.rs
//  repograph
//

use tree_sitter::Node;

/// Get the text of a node with all whitespace removed.
/// Dotted names may legally contain spaces (`a . b`); identifiers never do.
pub fn compact_text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source)
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// 1-based line of the first error or missing node below `node`.
pub fn first_error_line(node: &Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            return first_error_line(&child);
        }
    }
    node.start_position().row + 1
}
