use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

/// Default heading level for top-level entities
pub const DEFAULT_SECTION_LEVEL: usize = 3;

/// Enumeration order of a module's top-level members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MemberOrder {
    /// Sorted by name
    #[default]
    Alphabetical,
    /// Order of first binding in the module body
    Source,
}

/// Root configuration structure for pymdgen, as read from `.pymdgen.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PymdgenConfig {
    /// Heading level of top-level functions and classes
    #[serde(default)]
    pub section_level: Option<usize>,

    /// Directories searched for modules, relative to the config file
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Top-level member order
    #[serde(default)]
    pub order: Option<MemberOrder>,

    /// Let undocumented classes and methods inherit documentation
    #[serde(default)]
    pub inherit_docs: Option<bool>,
}

impl PymdgenConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.section_level == Some(0) {
            return Err("section_level must be at least 1".to_string());
        }
        Ok(())
    }

    /// Resolve relative search paths against the directory holding the file.
    pub fn relative_to(mut self, base_dir: &Path) -> Self {
        self.search_paths = self
            .search_paths
            .into_iter()
            .map(|path| {
                if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                }
            })
            .collect();
        self
    }
}
