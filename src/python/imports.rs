//! Import bindings.
//!
//! Maps the names an `import` or `from ... import` statement binds to the
//! dotted path they refer to, resolving relative imports against the
//! importing module's package.

use tree_sitter::Node;

use super::parser::node_text;

/// A name taken from another module by `from module import name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportedMember {
    pub module: String,
    pub name: String,
}

/// One name bound by an import statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub target: String,
    /// Set for `from` imports, which may bind a function or class
    pub member: Option<ImportedMember>,
}

impl ImportBinding {
    fn new(local: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            target: target.into(),
            member: None,
        }
    }

    fn from_module(local: impl Into<String>, module: &str, name: &str) -> Self {
        Self {
            local: local.into(),
            target: join(module, name),
            member: Some(ImportedMember {
                module: module.to_string(),
                name: name.to_string(),
            }),
        }
    }
}

/// Bindings created by an `import_statement` or `import_from_statement`.
///
/// `package` is the package relative imports are resolved against.
pub fn import_bindings(node: &Node, source: &str, package: &str) -> Vec<ImportBinding> {
    match node.kind() {
        "import_statement" => plain_import(node, source),
        "import_from_statement" => from_import(node, source, package),
        _ => Vec::new(),
    }
}

fn plain_import(node: &Node, source: &str) -> Vec<ImportBinding> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| match name.kind() {
            // `import a.b.c` binds `a`
            "dotted_name" => {
                let dotted = node_text(&name, source);
                let head = dotted.split('.').next().unwrap_or(dotted);
                Some(ImportBinding::new(head, head))
            }
            "aliased_import" => {
                let target = name.child_by_field_name("name")?;
                let alias = name.child_by_field_name("alias")?;
                Some(ImportBinding::new(
                    node_text(&alias, source),
                    node_text(&target, source),
                ))
            }
            _ => None,
        })
        .collect()
}

fn from_import(node: &Node, source: &str, package: &str) -> Vec<ImportBinding> {
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return Vec::new();
    };
    let Some(module) = resolve_module(node_text(&module_node, source), package) else {
        return Vec::new();
    };

    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| {
            let (imported, local) = match name.kind() {
                "dotted_name" => {
                    let text = node_text(&name, source);
                    (text, text)
                }
                "aliased_import" => (
                    node_text(&name.child_by_field_name("name")?, source),
                    node_text(&name.child_by_field_name("alias")?, source),
                ),
                _ => return None,
            };
            Some(ImportBinding::from_module(local, &module, imported))
        })
        .collect()
}

/// Absolute dotted name for the module part of a `from` import.
///
/// Each leading dot climbs one package level above `package`.
pub fn resolve_module(spec: &str, package: &str) -> Option<String> {
    let level = spec.chars().take_while(|c| *c == '.').count();
    let relative = spec[level..].trim();
    if level == 0 {
        return Some(relative.to_string());
    }

    let mut base: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    if level - 1 > base.len() {
        return None;
    }
    base.truncate(base.len() - (level - 1));

    let base = base.join(".");
    Some(join(&base, relative))
}

fn join(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}.{}", prefix, name),
    }
}
