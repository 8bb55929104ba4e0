//! Locating modules by dotted name.

use std::path::{Path, PathBuf};

use crate::core::errors::{Error, Result};

/// A module found under one of the search roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedModule {
    pub name: String,
    pub path: PathBuf,
    /// `path` is a package's `__init__.py`
    pub is_package: bool,
}

impl ResolvedModule {
    /// Package that relative imports inside this module resolve against.
    pub fn package(&self) -> &str {
        if self.is_package {
            &self.name
        } else {
            self.name.rsplit_once('.').map_or("", |(parent, _)| parent)
        }
    }
}

/// Normalize a module argument written as a path into dotted notation.
///
/// Returns `None` when the argument already is a dotted name.
pub fn normalize_module_name(arg: &str) -> Option<String> {
    if !arg.contains(['/', '\\']) && !arg.ends_with(".py") {
        return None;
    }

    let trimmed = arg.strip_suffix(".py").unwrap_or(arg);
    let trimmed = trimmed
        .strip_prefix("./")
        .or_else(|| trimmed.strip_prefix(".\\"))
        .unwrap_or(trimmed);
    let name = trimmed
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    Some(name)
}

/// Finds module files under an ordered list of search roots.
#[derive(Clone, Debug)]
pub struct ModuleResolver {
    roots: Vec<PathBuf>,
}

impl ModuleResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// `a.b.c` is `a/b/c.py` or `a/b/c/__init__.py` under the first root
    /// that has either.
    pub fn resolve(&self, name: &str) -> Result<ResolvedModule> {
        let not_found = || Error::ModuleNotFound {
            name: name.to_string(),
            searched: self.roots.len(),
        };

        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|segment| !is_identifier(segment)) {
            return Err(not_found());
        }

        self.roots
            .iter()
            .find_map(|root| candidate(root, &segments))
            .map(|(path, is_package)| ResolvedModule {
                name: name.to_string(),
                path,
                is_package,
            })
            .ok_or_else(not_found)
    }
}

fn candidate(root: &Path, segments: &[&str]) -> Option<(PathBuf, bool)> {
    let dir: PathBuf = segments.iter().fold(root.to_path_buf(), |acc, s| acc.join(s));

    let module_file = dir.with_extension("py");
    if module_file.is_file() {
        return Some((module_file, false));
    }

    let init = dir.join("__init__.py");
    init.is_file().then_some((init, true))
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
