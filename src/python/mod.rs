//! Python module metadata.
//!
//! Stands in for runtime reflection: a module is located on the search
//! roots, parsed with tree-sitter, and its declarations turned into the
//! metadata model the renderer consumes.

pub mod docstring;
pub mod extractor;
pub mod imports;
pub mod inherit;
pub mod module_path;
pub mod parser;

use std::collections::{HashMap, HashSet};
use std::fs;

use tracing::{debug, warn};

use crate::core::errors::{Error, Result};
use crate::core::{Documentable, Module};

pub use extractor::extract_module;
pub use imports::ImportedMember;
pub use module_path::{normalize_module_name, ModuleResolver, ResolvedModule};
pub use parser::{parse_source, PythonSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub inherit_docs: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { inherit_docs: true }
    }
}

/// Loads modules by dotted name, following `from` imports into other
/// modules on the same search roots.
///
/// Every module is parsed at most once per loader. A module that is still
/// being loaded when one of its dependencies imports from it contributes
/// nothing to that import.
#[derive(Debug)]
pub struct ModuleLoader {
    resolver: ModuleResolver,
    options: ExtractOptions,
    loaded: HashMap<String, Module>,
    in_progress: HashSet<String>,
}

impl ModuleLoader {
    pub fn new(resolver: ModuleResolver, options: ExtractOptions) -> Self {
        Self {
            resolver,
            options,
            loaded: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Locate, parse and extract the module `name`.
    pub fn load(&mut self, name: &str) -> Result<Module> {
        if let Some(module) = self.loaded.get(name) {
            return Ok(module.clone());
        }

        let resolved = self.resolver.resolve(name)?;
        let content = fs::read_to_string(&resolved.path)?;
        let parsed = parse_source(&content, &resolved.path)?;

        self.in_progress.insert(name.to_string());
        let mut module = extract_module(&parsed, &resolved.name, resolved.package(), |member| {
            self.imported(member)
        });
        self.in_progress.remove(name);

        if self.options.inherit_docs {
            inherit::inherit_docs(&mut module);
        }
        self.loaded.insert(name.to_string(), module.clone());
        Ok(module)
    }

    fn imported(&mut self, member: &ImportedMember) -> Option<Documentable> {
        if self.in_progress.contains(&member.module) {
            debug!("{} is still loading, skipping {}", member.module, member.name);
            return None;
        }

        let module = match self.load(&member.module) {
            Ok(module) => module,
            Err(Error::ModuleNotFound { .. }) => {
                debug!("{} is not on the search path", member.module);
                return None;
            }
            Err(err) => {
                warn!("Cannot follow import of {}.{}: {}", member.module, member.name, err);
                return None;
            }
        };

        module
            .members
            .into_iter()
            .find(|candidate| candidate.name == member.name)
            .map(|candidate| candidate.entity)
    }
}
