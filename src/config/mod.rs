//! Configuration file support.
//!
//! Settings come from an optional `.pymdgen.toml`, discovered by walking up
//! from the working directory or named with `--config`. Command-line flags
//! take precedence over the file, which takes precedence over defaults.

mod core;
mod loader;

pub use self::core::{MemberOrder, PymdgenConfig, DEFAULT_SECTION_LEVEL};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_file,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
