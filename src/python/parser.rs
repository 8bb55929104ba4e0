//! Tree-sitter parser integration for Python
//!
//! Parses module source with the tree-sitter Python grammar and rejects
//! trees containing syntax errors, the way an import of the module would.

use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

use crate::core::errors::{Error, Result};

/// A parsed Python module together with the text it was parsed from.
#[derive(Debug)]
pub struct PythonSource {
    pub tree: Tree,
    pub source: String,
    pub path: PathBuf,
}

impl PythonSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Parse Python source code into a tree-sitter AST
pub fn parse_source(content: &str, path: &Path) -> Result<PythonSource> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_python::LANGUAGE.into();
    parser
        .set_language(&language)
        .map_err(|e| Error::parse(path, 0, 0, format!("failed to load Python grammar: {}", e)))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, 0, 0, "parser produced no tree"))?;

    if let Some(node) = first_error(&tree.root_node()) {
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        return Err(Error::parse(
            path,
            node_line(&node),
            node.start_position().column + 1,
            message,
        ));
    }

    Ok(PythonSource {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
    })
}

/// Earliest error or missing node in document order
fn first_error<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
    children.iter().find_map(first_error)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Named children of `node`, skipping comments
pub fn statements<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}
