use clap::Parser;
use std::path::PathBuf;

use crate::config::MemberOrder;

#[derive(Parser, Debug)]
#[command(name = "pymdgen")]
#[command(about = "Inspects given python modules and prints markdown", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Modules to document, in python notation (e.g. `package.module`)
    #[arg(value_name = "MODULES")]
    pub modules: Vec<String>,

    /// Display debug messages
    #[arg(long)]
    pub debug: bool,

    /// Markdown section level of top-level functions and classes [default: 3]
    #[arg(long)]
    pub section_level: Option<usize>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory searched for modules (defaults to the current directory)
    #[arg(
        short = 'p',
        long = "search-path",
        env = "PYMDGEN_PATH",
        value_delimiter = ':'
    )]
    pub search_paths: Vec<PathBuf>,

    /// Order of top-level functions and classes [default: alphabetical]
    #[arg(long, value_enum)]
    pub order: Option<MemberOrder>,

    /// Do not fill missing docstrings from base classes
    #[arg(long)]
    pub no_inherit_docs: bool,

    /// Configuration file (defaults to the nearest .pymdgen.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
