use std::fs;
use std::io;
use std::path::Path;

use super::core::PymdgenConfig;
use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".pymdgen.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse `.pymdgen.toml` contents and reject invalid settings.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<PymdgenConfig, String> {
    let config = toml::from_str::<PymdgenConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config.validate()?;
    Ok(config)
}

/// A config file found during discovery. Problems are logged, not fatal.
fn discovered_config(config_path: &Path) -> Option<PymdgenConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!(
                "Ignoring unreadable {} ({}): {}",
                CONFIG_FILE_NAME,
                config_path.display(),
                e
            );
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config.relative_to(parent_dir(config_path)))
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Directories searched for `.pymdgen.toml`, nearest first.
pub fn directory_ancestors(start: &Path, max_depth: usize) -> impl Iterator<Item = &Path> {
    start.ancestors().take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn discover_config(start: &Path) -> PymdgenConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| discovered_config(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PymdgenConfig::default()
        })
}

pub fn load_config() -> PymdgenConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            PymdgenConfig::default()
        }
    }
}

/// Load a config file named explicitly; any failure is an error
pub fn load_config_file(path: &Path) -> Result<PymdgenConfig> {
    let contents = fs::read_to_string(path)?;
    let config = parse_and_validate_config(&contents)
        .map_err(|e| Error::Configuration(format!("{} ({})", e, path.display())))?;
    Ok(config.relative_to(parent_dir(path)))
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}
